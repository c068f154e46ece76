use arinc429::{
    Arinc429Error, Bcd, BcdStatus, Bnr, DataField, Discrete, Parity, Payload, Result, Rounding,
    Word, WordBuilder,
};

fn assert_odd_parity(word: &Word) {
    assert_eq!(word.bits().count_ones() % 2, 1, "word {:#010x}", word.bits());
}

#[test]
fn bcd_word_matches_reference() -> Result<()> {
    let mut word = Word::new();
    word.set_label(0o1)?;
    word.set_bit_field(11, 29, Bcd::new(121.5, 0.1)?)?;

    assert_eq!(word.data(), 0x1215);
    let decoded = Bcd::decode(word.get_bit_field(11, 29)?, 0, 0.1)?;
    assert!((decoded - 121.5).abs() < 1e-9);
    assert!(word.to_string().starts_with("Label=0o1, SDI=0, Data=0x1215, SSM=0"));
    Ok(())
}

#[test]
fn bnr_word_decodes_to_nearest_lesser_step() -> Result<()> {
    let mut word = Word::new();
    word.set_bit_field(13, 29, Bnr::new(90.0, 0.043945313)?)?;

    let decoded = Bnr::decode(word.get_bit_field(13, 29)?, 17, 0.043945313)?;
    assert!((decoded - 89.956055711).abs() < 1e-9);
    assert!(decoded != 90.0);
    assert!((word.decode_bnr(13, 29, 0.043945313)? - 89.956055711).abs() < 1e-9);
    Ok(())
}

#[test]
fn bnr_nearest_rounding_is_opt_in() -> Result<()> {
    let mut word = Word::new();
    word.set_bit_field(
        13,
        29,
        Bnr::with_rounding(90.0, 0.043945313, Rounding::NearestTiesAway)?,
    )?;
    let decoded = word.decode_bnr(13, 29, 0.043945313)?;
    assert!((decoded - 90.000001024).abs() < 1e-9);
    Ok(())
}

#[test]
fn discrete_overflow_depends_on_width() -> Result<()> {
    let mut word = Word::new();
    match word.set_bit_field(11, 12, Discrete::new(6)) {
        Err(Arinc429Error::FieldOverflow { value, bit_length }) => {
            assert_eq!(value, 6);
            assert_eq!(bit_length, 2);
        }
        other => panic!("expected overflow, got {:?}", other),
    }

    word.set_bit_field(11, 13, Discrete::new(6))?;
    assert_eq!(Discrete::decode(word.get_bit_field(11, 13)?).value(), 6);
    Ok(())
}

#[test]
fn label_bounds() -> Result<()> {
    let mut word = Word::new();
    word.set_label(0o377)?;
    assert_eq!(word.label(), 0o377);
    assert!(matches!(word.set_label(0o400), Err(Arinc429Error::Range(_))));
    assert_eq!(word.label(), 0o377);
    Ok(())
}

#[test]
fn fields_are_independent() -> Result<()> {
    let resolution = 0.043945313;
    let mut word = Word::new();
    word.set_bit_field(13, 29, Bnr::new(-45.0, resolution)?)?;
    let bnr_bits = word.get_bit_field(13, 29)?;

    word.set_bit_field(11, 12, Discrete::new(0b11))?;
    assert_eq!(word.get_bit_field(13, 29)?, bnr_bits);

    word.set_bit_field(13, 29, Bnr::new(12.0, resolution)?)?;
    assert_eq!(word.get_bit_field(11, 12)?, 0b11);

    let decoded = word.decode_bnr(13, 29, resolution)?;
    assert!((decoded - 12.0).abs() <= resolution);
    Ok(())
}

#[test]
fn parity_stays_odd_across_mutations() -> Result<()> {
    let mut word = Word::new();
    assert_odd_parity(&word);

    for label in [0o0u16, 0o1, 0o77, 0o205, 0o377] {
        word.set_label(label)?;
        assert_odd_parity(&word);
    }
    for sdi in 0..4u8 {
        word.set_sdi(sdi)?;
        assert_odd_parity(&word);
    }
    for ssm in 0..4u8 {
        word.set_ssm(ssm)?;
        assert_odd_parity(&word);
    }
    for value in [0u32, 1, 0x2AAAA, 0x55555, 0x7FFFF] {
        word.set_data(value)?;
        assert_odd_parity(&word);
    }
    for value in 0..8u32 {
        word.set_bit_field(11, 13, Discrete::new(value))?;
        assert_odd_parity(&word);
    }
    let _ = word.set_bit_field(11, 12, Discrete::new(7));
    assert_odd_parity(&word);
    Ok(())
}

#[test]
fn bcd_round_trip_with_sign_in_ssm() -> Result<()> {
    for &value in &[-799.9, -0.5, 0.0, 12.3, 999.9] {
        let bcd = Bcd::new(value, 0.1)?;
        let word = WordBuilder::new()
            .with_label(0o203)
            .with_ssm(bcd.sign().bits())
            .with_field(DataField::new(11, 29, bcd)?)
            .build()?;

        let decoded = word.decode_bcd(11, 29, 0.1)?;
        assert!((decoded - value).abs() <= 0.1, "{} -> {}", value, decoded);
        assert_eq!(word.ssm() == BcdStatus::Minus.bits(), value < 0.0);
    }
    Ok(())
}

#[test]
fn bnr_round_trip_across_range() -> Result<()> {
    let resolution = Bnr::resolution_for(180.0, 12)?;
    for &value in &[-179.9, -90.0, -0.02, 0.0, 45.5, 179.9] {
        let field = DataField::new(17, 29, Bnr::new(value, resolution)?)?;
        let mut word = Word::new();
        word.place(&field)?;

        let decoded = word.read(&field)?.decoded_value();
        assert!((decoded - value).abs() <= resolution, "{} -> {}", value, decoded);
    }
    Ok(())
}

#[test]
fn bnr_overflow_is_rejected() -> Result<()> {
    let resolution = Bnr::resolution_for(180.0, 12)?;
    let mut word = Word::new();
    let result = word.set_bit_field(17, 29, Bnr::new(180.0, resolution)?);
    assert!(matches!(result, Err(Arinc429Error::FieldOverflow { .. })));
    assert_eq!(word, Word::new());
    Ok(())
}

#[test]
fn rounding_ties_go_away_from_zero() -> Result<()> {
    let mut word = Word::new();
    let nearest = Rounding::NearestTiesAway;
    word.set_bit_field(11, 18, Bnr::with_rounding(1.25, 0.5, nearest)?)?;
    assert_eq!(word.decode_bnr(11, 18, 0.5)?, 1.5);

    word.set_bit_field(11, 18, Bnr::with_rounding(-1.25, 0.5, nearest)?)?;
    assert_eq!(word.decode_bnr(11, 18, 0.5)?, -1.5);

    word.set_bit_field(11, 18, Bcd::new(2.5, 1.0)?)?;
    assert_eq!(word.get_bit_field(11, 18)?, 0x3);
    Ok(())
}

#[test]
fn received_words_are_parity_checked() -> Result<()> {
    let sent = WordBuilder::new()
        .with_label(0o350)
        .with_field(DataField::new(11, 29, Discrete::new(0x12345))?)
        .build()?;

    let received = Word::from_received(sent.bits(), Parity::Odd)?;
    assert_eq!(received, sent);
    assert_eq!(received.label(), 0o350);

    let corrupted = sent.bits() ^ (1 << 15);
    assert!(matches!(
        Word::from_received(corrupted, Parity::Odd),
        Err(Arinc429Error::Parity(_))
    ));
    Ok(())
}

#[test]
fn payload_read_back_keeps_interpretation() -> Result<()> {
    let field = DataField::new(11, 29, Bcd::with_rounding(33.37, 0.01, Rounding::Floor)?)?;
    let mut word = Word::new();
    word.place(&field)?;

    match word.read(&field)? {
        Payload::Bcd(bcd) => {
            assert_eq!(bcd.rounding(), Rounding::Floor);
            assert!((bcd.decoded_value() - 33.37).abs() < 1e-9);
        }
        other => panic!("expected BCD, got {}", other),
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn word_serde_round_trip() -> Result<()> {
    let word = WordBuilder::new()
        .with_label(0o1)
        .with_field(DataField::new(11, 29, Bcd::new(121.5, 0.1)?)?)
        .build()?;

    let json = serde_json::to_string(&word).expect("serialize");
    let restored: Word = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, word);

    let field = DataField::new(13, 29, Bnr::new(90.0, 0.043945313)?)?;
    let json = serde_json::to_string(&field).expect("serialize");
    assert!(!json.contains("steps"));
    let restored: DataField = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, field);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn serde_rejects_invalid_values() -> Result<()> {
    use arinc429::BitRange;

    let field = r#"{"lsb":0,"msb":5,"payload":{"Discrete":1}}"#;
    assert!(serde_json::from_str::<DataField>(field).is_err());
    let field = r#"{"range":{"lsb":0,"msb":5},"payload":{"Discrete":1}}"#;
    assert!(serde_json::from_str::<DataField>(field).is_err());
    let field = r#"{"lsb":11,"msb":30,"payload":{"Discrete":1}}"#;
    assert!(serde_json::from_str::<DataField>(field).is_err());

    assert!(serde_json::from_str::<BitRange>(r#"{"lsb":0,"msb":8}"#).is_err());
    assert!(serde_json::from_str::<Word>(r#"{"value":0,"parity":"Odd"}"#).is_err());

    let bnr = r#"{"value":90.0,"resolution":-1.0,"rounding":"Floor"}"#;
    assert!(serde_json::from_str::<Bnr>(bnr).is_err());
    let bcd = r#"{"value":1.0,"resolution":0.0,"rounding":"Floor"}"#;
    assert!(serde_json::from_str::<Bcd>(bcd).is_err());

    // A stale step count is ignored and recomputed from the value.
    let bcd = r#"{"value":1.0,"resolution":0.1,"rounding":"NearestTiesAway","steps":999999}"#;
    let bcd: Bcd = serde_json::from_str(bcd).expect("deserialize");
    assert_eq!(bcd.encode(), 0x10);

    let word: Word = serde_json::from_str(r#"{"value":2147483648,"parity":"Odd"}"#)
        .expect("deserialize");
    assert!(word.is_parity_valid());
    Ok(())
}
