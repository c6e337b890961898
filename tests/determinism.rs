use lexiscan_core::config::{Configuration, RuleTables};
use lexiscan_core::document::ContractDocument;
use lexiscan_core::pipeline::{Annotator, ExtractionPipeline};
use lexiscan_core::types::{DocumentId, RecognizedEntity};

const LEASE: &str = "This Lease is made on 1st April 2024 between Kapoor Estates LLP \
and Meera Iyer. Monthly rent of Rs. 45,000 and a deposit of 2 lakh rupees are \
payable. The lease expires on 31/03/2027. Courts at Bengaluru have jurisdiction.";

fn recognized() -> Vec<RecognizedEntity> {
    vec![
        RecognizedEntity::new("Kapoor Estates LLP", "ORG"),
        RecognizedEntity::new("Meera Iyer", "PERSON"),
        RecognizedEntity::new("Bengaluru", "GPE"),
        RecognizedEntity::new("The Lessee", "PERSON"),
    ]
}

fn document() -> ContractDocument {
    ContractDocument::new(DocumentId::new("lease.txt"), LEASE.to_string())
}

#[test]
fn extraction_is_byte_identical_across_runs() {
    let config = Configuration::default();
    let pipeline = ExtractionPipeline::new(&config);

    let first = serde_json::to_string(&pipeline.extract(&document(), &recognized())).unwrap();
    for _ in 0..10 {
        let again = serde_json::to_string(&pipeline.extract(&document(), &recognized())).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn annotation_is_identical_across_independently_built_configurations() {
    // 1. Two configurations from the same tables
    let a = Configuration::new(RuleTables::default()).unwrap();
    let b = Configuration::new(RuleTables::default()).unwrap();

    // 2. Annotate the same document with each
    let left = Annotator::new(&a).annotate(&document(), &recognized());
    let right = Annotator::new(&b).annotate(&document(), &recognized());

    // 3. Outcome and counters match exactly
    assert_eq!(left, right);
}

#[test]
fn document_version_depends_only_on_text() {
    let a = ContractDocument::new(DocumentId::new("a.txt"), LEASE.to_string());
    let b = ContractDocument::new(DocumentId::new("b.txt"), LEASE.to_string());
    let c = ContractDocument::new(DocumentId::new("a.txt"), format!("{LEASE} "));

    assert_eq!(a.version(), b.version());
    assert_ne!(a.version(), c.version());
}
