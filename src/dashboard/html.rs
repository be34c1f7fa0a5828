//! Páginas HTML del panel. Todo el texto que viene del usuario o del
//! proveedor pasa por `escape`; las depicciones SVG se generan localmente y se
//! incrustan tal cual.

use chem_adapters::{Table, Tabular};
use chem_core::{BioactivityReport, CompoundLookupReport, CompoundOutcome, SimilarityReport};
use chem_domain::CandidateSet;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Estado de cada panel al componer la página.
#[derive(Default)]
pub struct PanelInputs<'a> {
    pub names: &'a str,
    pub chembl_id: &'a str,
    pub smiles: &'a str,
}

pub fn page(inputs: &PanelInputs<'_>, candidates: &CandidateSet, results: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>ChEMBL Cheminformatics Dashboard</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }}
.panels {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }}
.panel {{ background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
.results {{ background: white; padding: 20px; border-radius: 8px; margin-top: 20px; }}
table {{ border-collapse: collapse; margin: 10px 0; }}
th, td {{ border: 1px solid #ddd; padding: 4px 8px; text-align: left; }}
th {{ background: #eef; }}
.warning {{ color: #8a6d00; background: #fff8e0; padding: 8px; border-radius: 4px; }}
.error {{ color: #a00; background: #fde8e8; padding: 8px; border-radius: 4px; }}
.info {{ color: #114; background: #e8f0fd; padding: 8px; border-radius: 4px; }}
textarea, input[type=text] {{ width: 100%; box-sizing: border-box; }}
</style>
</head>
<body>
<h1>ChEMBL Cheminformatics Dashboard</h1>
<div class="panels">
<form class="panel" method="get" action="/compounds">
<h2>Compound Explorer</h2>
<label>Enter compound names (one per line)<br><textarea name="names" rows="5">{names}</textarea></label>
<button type="submit">Search</button>
</form>
<form class="panel" method="get" action="/bioactivity">
<h2>Bioactivity Explorer</h2>
<label>Enter ChEMBL ID (e.g., CHEMBL25 for aspirin)<br><input type="text" name="chembl_id" value="{chembl_id}"></label>
<button type="submit">Search</button>
</form>
<form class="panel" method="get" action="/similar">
<h2>Similar Compounds</h2>
<label>Enter SMILES to find similar compounds<br><input type="text" name="smiles" value="{smiles}"></label>
<p>Reference set: {candidates}</p>
<button type="submit">Compare</button>
</form>
</div>
{results}
</body>
</html>
"#,
            names = escape(inputs.names),
            chembl_id = escape(inputs.chembl_id),
            smiles = escape(inputs.smiles),
            candidates = escape(&candidates.names().join(", ")),
            results = results)
}

pub fn table(table: &Table) -> String {
    let mut out = String::from("<table><thead><tr>");
    for h in &table.headers {
        out.push_str(&format!("<th>{}</th>", escape(h)));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(&cell.display())));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

pub fn message(class: &str, text: &str) -> String {
    format!(r#"<p class="{class}">{}</p>"#, escape(text))
}

fn section(title: &str, body: &str) -> String {
    format!(r#"<div class="results"><h2>{}</h2>{body}</div>"#, escape(title))
}

fn download_link(href: &str, label: &str) -> String {
    format!(r#"<p><a href="{}" download>{}</a></p>"#, escape(href), escape(label))
}

pub fn compounds(report: &CompoundLookupReport, names_param: &str) -> String {
    let mut body = String::new();
    for entry in &report.entries {
        body.push_str(&format!("<h3>{}</h3>", escape(&entry.name)));
        match &entry.outcome {
            CompoundOutcome::Found { record, depiction, structure_error, alternatives } => {
                body.push_str(&format!("<p><strong>ChEMBL ID:</strong> <code>{}</code></p>", escape(&record.chembl_id)));
                if !alternatives.is_empty() {
                    body.push_str(&message("info",
                                           &format!("Several records share this name; also: {}", alternatives.join(", "))));
                }
                if let Some(svg) = depiction {
                    body.push_str(&format!(r#"<figure>{svg}<figcaption>{}</figcaption></figure>"#, escape(&entry.name)));
                }
                if let Some(err) = structure_error {
                    body.push_str(&message("warning", &format!("Structure could not be drawn: {err}")));
                }
            }
            CompoundOutcome::NotFound => {
                body.push_str(&message("warning", &format!("No compound found for '{}'.", entry.name)));
            }
            CompoundOutcome::Failed { reason } => {
                body.push_str(&message("error", &format!("Lookup failed for '{}': {reason}", entry.name)));
            }
        }
    }
    let table_data = report.to_table();
    if !table_data.is_empty() {
        body.push_str(&table(&table_data));
        body.push_str(&download_link(&format!("/compounds/export?names={}", urlencoding::encode(names_param)),
                                     "Download All Properties as Excel"));
    }
    section("Compound Explorer", &body)
}

pub fn bioactivity(report: &BioactivityReport) -> String {
    let title = format!("Bioactivity Data for {}", report.chembl_id);
    if report.is_empty() {
        return section(&title, &message("warning", "No bioactivity data found."));
    }
    let mut body = table(&report.to_table());
    body.push_str(&download_link(&format!("/bioactivity/export?chembl_id={}", urlencoding::encode(&report.chembl_id)),
                                 "Download Bioactivity Data"));
    section(&title, &body)
}

pub fn similarity(report: &SimilarityReport) -> String {
    let mut body = message("info", "Comparing against known ChEMBL molecules...");
    if report.is_empty() {
        body.push_str(&message("warning", "No candidate could be compared."));
    } else {
        body.push_str(&table(&report.to_table()));
        body.push_str(&download_link(&format!("/similar/export?smiles={}", urlencoding::encode(&report.query)),
                                     "Download Similar Compounds"));
    }
    for skip in &report.skipped {
        body.push_str(&message("warning", &format!("{} skipped: {}", skip.name, skip.reason)));
    }
    section("Similar Compounds", &body)
}

pub fn error(title: &str, text: &str) -> String {
    section(title, &message("error", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppConfig, DashboardSession};

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<b a="1">&'"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;");
    }

    #[tokio::test]
    async fn download_links_carry_the_encoded_query() {
        let session = DashboardSession::offline(&AppConfig::default()).unwrap();
        let html = similarity(&session.similar("CC(=O)O").await.unwrap());
        assert!(html.contains("/similar/export?smiles=CC%28%3DO%29O"));

        let html = compounds(&session.compounds(&["aspirin", "caffeine"]).await.unwrap(), "aspirin\ncaffeine");
        assert!(html.contains("/compounds/export?names=aspirin%0Acaffeine"));
    }

    #[test]
    fn page_echoes_inputs_escaped() {
        let inputs = PanelInputs { smiles: "<script>", ..PanelInputs::default() };
        let html = page(&inputs, &CandidateSet::reference(), "");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("aspirin, ibuprofen"));
    }
}
