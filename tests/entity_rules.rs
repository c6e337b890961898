use lexiscan_core::config::Configuration;
use lexiscan_core::entities::{process_entities, Deduplicator, EntityValidator, Rejection};
use lexiscan_core::types::{Entity, Label};

#[test]
fn validator_rejects_degenerate_entities() {
    let config = Configuration::default();
    let validator = EntityValidator::new(&config);

    assert!(!validator.is_valid("X", Label::PartyName));
    assert!(!validator.is_valid("", Label::Jurisdiction));
    assert!(!validator.is_valid("not a number", Label::TotalAmount));

    assert!(validator.is_valid("ABC Corp", Label::PartyName));
    assert!(validator.is_valid("Mumbai", Label::Jurisdiction));
    assert!(validator.is_valid("Rs. 10", Label::TotalAmount));
}

#[test]
fn length_counts_chars_not_bytes() {
    let config = Configuration::default();
    let validator = EntityValidator::new(&config);

    // Two chars, six bytes.
    assert_eq!(validator.validate("東京", Label::Jurisdiction), Ok(()));
    assert_eq!(
        validator.validate("東京", Label::PartyName),
        Err(Rejection::TooShort { min: 3 })
    );
}

#[test]
fn equivalent_dates_collapse_to_one_entity() {
    let config = Configuration::default();
    let processed = process_entities(
        &config,
        [
            ("15/01/2024", Label::EffectiveDate),
            ("2024-01-15", Label::EffectiveDate),
        ],
    );

    assert_eq!(
        processed.entities,
        vec![Entity {
            text: "2024-01-15".into(),
            label: Label::EffectiveDate,
            original_text: Some("15/01/2024".into()),
        }]
    );
    assert_eq!(processed.counters.duplicates_dropped, 1);
}

#[test]
fn same_text_under_different_labels_is_kept() {
    let config = Configuration::default();
    let processed = process_entities(
        &config,
        [
            ("2024-01-15", Label::EffectiveDate),
            ("2024-01-15", Label::ExpirationDate),
        ],
    );
    assert_eq!(processed.entities.len(), 2);
}

#[test]
fn dedup_of_processed_output_is_a_no_op() {
    let config = Configuration::default();
    let processed = process_entities(
        &config,
        [
            ("ABC Corp.", Label::PartyName),
            ("abc corp", Label::PartyName),
            ("Rs. 1 lakh", Label::TotalAmount),
            ("INR 100000", Label::TotalAmount),
            ("Pune", Label::Jurisdiction),
        ],
    );
    assert_eq!(processed.entities.len(), 3);

    let (again, dropped) = Deduplicator.deduplicate(processed.entities.clone());
    assert_eq!(again, processed.entities);
    assert_eq!(dropped, 0);
}

#[test]
fn original_text_only_when_normalization_changed_something() {
    let config = Configuration::default();
    let processed = process_entities(
        &config,
        [
            ("  Mumbai  ", Label::Jurisdiction),
            ("USD 1 million", Label::TotalAmount),
        ],
    );

    assert_eq!(processed.entities[0], Entity::new("Mumbai", Label::Jurisdiction));
    assert_eq!(
        processed.entities[1].original_text.as_deref(),
        Some("USD 1 million")
    );
}

#[test]
fn empty_input_yields_empty_output() {
    let config = Configuration::default();
    let processed = process_entities(&config, std::iter::empty::<(&str, Label)>());

    assert!(processed.entities.is_empty());
    assert_eq!(processed.counters.received, 0);
}
