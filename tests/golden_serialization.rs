use lexiscan_core::config::Configuration;
use lexiscan_core::document::ContractDocument;
use lexiscan_core::pipeline::{Annotator, AnnotationOutcome, ExtractionPipeline};
use lexiscan_core::types::{DocumentId, Entity, Label, RecognizedEntity, TrainingRecord};
use serde_json::Value;

#[test]
fn golden_training_record_line() {
    let config = Configuration::default();
    let document = ContractDocument::new(DocumentId::new("pay.txt"), "Pay Rs. 500 now".to_string());

    let annotation = Annotator::new(&config).annotate(&document, &[]);
    let AnnotationOutcome::Labelled(record) = annotation.outcome else {
        panic!("expected a labelled document");
    };

    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"text":"Pay Rs. 500 now","label":[[4,11,"TOTAL_AMOUNT"]]}"#
    );
}

#[test]
fn training_record_round_trips_and_rejects_overlap() {
    let line = r#"{"text":"Signed 01/02/2024 in Pune","label":[[7,17,"EFFECTIVE_DATE"],[21,25,"JURISDICTION"]]}"#;
    let record: TrainingRecord = serde_json::from_str(line).unwrap();
    assert_eq!(record.label.len(), 2);
    assert!(record.validate().is_ok());
    assert_eq!(serde_json::to_string(&record).unwrap(), line);

    let overlapping = r#"{"text":"abcdefgh","label":[[0,4,"PARTY_NAME"],[2,6,"PARTY_NAME"]]}"#;
    assert!(serde_json::from_str::<TrainingRecord>(overlapping).is_err());

    let empty_span = r#"{"text":"abcdefgh","label":[[3,3,"PARTY_NAME"]]}"#;
    assert!(serde_json::from_str::<TrainingRecord>(empty_span).is_err());
}

#[test]
fn golden_entity_json() {
    let plain = Entity::new("New Delhi", Label::Jurisdiction);
    assert_eq!(
        serde_json::to_string(&plain).unwrap(),
        r#"{"text":"New Delhi","label":"JURISDICTION"}"#
    );

    let changed = Entity {
        text: "2024-03-15".into(),
        label: Label::EffectiveDate,
        original_text: Some("15th March 2024".into()),
    };
    assert_eq!(
        serde_json::to_string(&changed).unwrap(),
        r#"{"text":"2024-03-15","label":"EFFECTIVE_DATE","original_text":"15th March 2024"}"#
    );
}

#[test]
fn labels_serialize_screaming_snake_case() {
    let names: Vec<String> = Label::ALL
        .iter()
        .map(|label| serde_json::to_value(label).unwrap().as_str().unwrap().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "PARTY_NAME",
            "EFFECTIVE_DATE",
            "EXPIRATION_DATE",
            "JURISDICTION",
            "TOTAL_AMOUNT",
            "INTEREST_RATE",
            "COLLATERAL",
            "CONFIDENTIALITY_PERIOD",
            "TERMINATION_NOTICE_PERIOD",
            "GOVERNING_LAW",
        ]
    );
}

#[test]
fn extraction_report_shape() {
    let config = Configuration::default();
    let document = ContractDocument::new(
        DocumentId::new("./Deals/Term Sheet.txt"),
        "Facility of USD 2 million to Orion Metals Ltd dated 2024-06-30.".to_string(),
    );
    let report = ExtractionPipeline::new(&config).extract(
        &document,
        &[RecognizedEntity::new("Orion Metals Ltd", "ORG")],
    );

    let json: Value = serde_json::to_value(&report).unwrap();

    let entities = json["entities"].as_array().unwrap();
    assert_eq!(entities.len(), 3);
    assert_eq!(entities[0]["text"], "USD 2000000.00");
    assert_eq!(entities[0]["original_text"], "USD 2 million");
    assert!(entities[1].get("original_text").is_none());

    let metadata = &json["metadata"];
    assert_eq!(metadata["document_id"], "deals/term sheet.txt");
    assert_eq!(metadata["entities_found"], 3);
    assert_eq!(metadata["entities_by_type"]["TOTAL_AMOUNT"], 1);
    assert_eq!(metadata["entities_by_type"]["PARTY_NAME"], 1);
    assert_eq!(metadata["entities_by_type"]["EFFECTIVE_DATE"], 1);
    assert_eq!(metadata["counters"]["entities"]["emitted"], 3);
    assert!(metadata["document_version"]
        .as_str()
        .unwrap()
        .starts_with("sha256:"));
}
