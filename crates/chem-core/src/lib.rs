//! chem-core: las tres operaciones del panel (similitud, compuestos y
//! bioactividad). Reciben explícitamente el proveedor y el motor químico.
pub mod bioactivity;
pub mod lookup;
pub mod similarity;

pub use bioactivity::{lookup_bioactivity, BioactivityReport};
pub use lookup::{lookup_compounds, parse_names, select_preferred, CompoundLookup, CompoundLookupReport, CompoundOutcome};
pub use similarity::{rank_similar, SimilarityReport};
