//! Ranking por similitud estructural.
//!
//! La consulta es obligatoria: si no se puede interpretar, la operación
//! entera falla con `InvalidStructure`. Los candidatos son de mejor esfuerzo:
//! los que no se resuelven o no se interpretan se omiten y quedan anotados en
//! `skipped`.
//!
//! La resolución consulta al proveedor de uno en uno y en el orden del
//! conjunto. El cálculo de fingerprints y Tanimoto se reparte con rayon
//! conservando el orden de entrada, de modo que el ordenamiento estable final
//! respeta ese orden en los empates.

use chem_domain::{CandidateSet, CandidateSource, DomainError, SimilarityResult, SkipReason, SkippedCandidate};
use chem_providers::ChemDataProvider;
use chemengine::{ChemEngine, Fingerprint};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::lookup::select_preferred;

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
    pub id: Uuid,
    /// Notación de la consulta, recortada.
    pub query: String,
    /// Digest del fingerprint de la consulta.
    pub query_digest: String,
    /// Ordenados por puntuación descendente.
    pub results: Vec<SimilarityResult>,
    pub skipped: Vec<SkippedCandidate>,
    pub generated_at: DateTime<Utc>,
}

impl SimilarityReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

enum Resolution {
    Resolved { name: String, smiles: String },
    Skipped(SkippedCandidate),
}

pub async fn rank_similar<P>(provider: &P,
                             engine: &ChemEngine,
                             query: &str,
                             candidates: &CandidateSet)
                             -> Result<SimilarityReport, DomainError>
    where P: ChemDataProvider + ?Sized
{
    let query = query.trim();
    let query_mol = engine.parse(query)?;
    let query_fp = engine.fingerprint(&query_mol);

    let mut resolutions = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        resolutions.push(resolve(provider, &candidate.name, &candidate.source).await);
    }

    let scored: Vec<Result<SimilarityResult, SkippedCandidate>> =
        resolutions.into_par_iter()
                   .map(|resolution| match resolution {
                       Resolution::Resolved { name, smiles } => score(engine, &query_fp, name, smiles),
                       Resolution::Skipped(skipped) => Err(skipped),
                   })
                   .collect();

    let mut results = Vec::new();
    let mut skipped = Vec::new();
    for item in scored {
        match item {
            Ok(result) => results.push(result),
            Err(skip) => {
                log::debug!("candidato '{}' omitido: {}", skip.name, skip.reason);
                skipped.push(skip);
            }
        }
    }
    // sort_by es estable: los empates conservan el orden del conjunto.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    log::info!("similitud de '{}': {} resultado(s), {} omitido(s)", query, results.len(), skipped.len());
    Ok(SimilarityReport { id: Uuid::new_v4(),
                          query: query.to_string(),
                          query_digest: query_fp.digest(),
                          results,
                          skipped,
                          generated_at: Utc::now() })
}

async fn resolve<P>(provider: &P, name: &str, source: &CandidateSource) -> Resolution
    where P: ChemDataProvider + ?Sized
{
    let skip = |reason| Resolution::Skipped(SkippedCandidate { name: name.to_string(), reason });
    let key = match source {
        CandidateSource::Notation(smiles) => {
            return Resolution::Resolved { name: name.to_string(), smiles: smiles.clone() };
        }
        CandidateSource::Lookup(key) => key,
    };
    match provider.find_compounds_by_name(key).await {
        Err(err) => skip(SkipReason::ProviderUnavailable(err.to_string())),
        Ok(records) => match select_preferred(records) {
            None => skip(SkipReason::NotFound),
            Some((record, _)) => match record.smiles {
                Some(smiles) => Resolution::Resolved { name: name.to_string(), smiles },
                None => skip(SkipReason::NoStructure),
            },
        },
    }
}

fn score(engine: &ChemEngine,
         query_fp: &Fingerprint,
         name: String,
         smiles: String)
         -> Result<SimilarityResult, SkippedCandidate> {
    let score = engine.fingerprint_smiles(&smiles)
                      .and_then(|fp| engine.similarity(query_fp, &fp));
    match score {
        Ok(score) => Ok(SimilarityResult { name, smiles, score }),
        Err(err) => Err(SkippedCandidate { name, reason: SkipReason::InvalidStructure(err.to_string()) }),
    }
}
