use chem_domain::compound::{ALOGP, FULL_MWT, STANDARD_PROPERTIES};
use chem_domain::{compare_identifiers, Candidate, CandidateSet, CompoundRecord, DomainError, SimilarityResult};
use chemengine::ChemEngine;

#[test]
fn test_record_roundtrips_through_json() {
    let rec = CompoundRecord::new("CHEMBL113").with_name("CAFFEINE")
                                              .with_smiles("Cn1c(=O)c2c(ncn2C)n(C)c1=O")
                                              .with_property(FULL_MWT, Some(194.19))
                                              .with_property(ALOGP, None);
    let json = serde_json::to_string(&rec).unwrap();
    let back: CompoundRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(rec, back);
}

#[test]
fn test_lowest_identifier_wins_when_sorting() {
    let mut ids = vec!["CHEMBL1000", "CHEMBL25", "CHEMBL3"];
    ids.sort_by(|a, b| compare_identifiers(a, b));
    assert_eq!(ids, vec!["CHEMBL3", "CHEMBL25", "CHEMBL1000"]);
}

#[test]
fn test_standard_properties_order_matches_table_columns() {
    assert_eq!(STANDARD_PROPERTIES, ["full_mwt", "alogp", "hba", "hbd", "num_ro5_violations"]);
}

#[test]
fn test_invalid_record_structure_becomes_domain_error() {
    let rec = CompoundRecord::new("CHEMBL9").with_smiles("not a smiles");
    let err: DomainError = rec.molecule(&ChemEngine::new()).unwrap().unwrap_err().into();
    assert!(matches!(err, DomainError::InvalidStructure(_)));
}

#[test]
fn test_candidate_set_preserves_input_order() {
    let set = CandidateSet::new(vec![Candidate::lookup("b"), Candidate::notation("a", "C"), Candidate::lookup("c")]);
    assert_eq!(set.names(), vec!["b", "a", "c"]);
    let r = SimilarityResult { name: "a".into(), smiles: "C".into(), score: 1.0 / 3.0 };
    assert_eq!(r.display_score(), 0.333);
}
