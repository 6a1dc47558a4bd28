use serde::{Deserialize, Serialize};

/// One element of the request body array: `[{"Text": "..."}]`
#[derive(Debug, Clone, Serialize)]
pub struct TextItem<'a> {
    #[serde(rename = "Text")]
    pub text: &'a str,
}

/// One element of the response array
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResult {
    pub translations: Vec<TranslationCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationCandidate {
    pub text: String,
    #[serde(default)]
    pub to: Option<String>,
}

/// Pull the first candidate of the first result out of a response body.
///
/// Returns a description of what was wrong on any other shape; callers log
/// it and report a generic failure.
pub fn extract_translation(body: &[u8]) -> Result<String, String> {
    let results: Vec<TranslateResult> =
        serde_json::from_slice(body).map_err(|e| format!("unexpected response body: {}", e))?;

    results
        .into_iter()
        .next()
        .ok_or_else(|| "empty result array".to_string())?
        .translations
        .into_iter()
        .next()
        .map(|candidate| candidate.text)
        .ok_or_else(|| "no translation candidates".to_string())
}
