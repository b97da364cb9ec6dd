//! Normalization of perfume-analysis payloads.
//!
//! The backend's AI step serializes its own output to a string before the
//! transport layer serializes the envelope again, so a response can arrive as
//! an object, as a JSON string holding an object, or with escaped quotes and
//! newlines left in. [`normalize`] turns any of these into one canonical
//! [`NormalizedAnalysisResponse`].
//!
//! Decoding is bounded: at most two parses of the top-level payload, one of
//! the `analysis` field and one of the perfume list. Only a top-level payload
//! that never yields an object is an error; inner fields that fail to decode
//! are logged and reported as absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// One perfume referenced in a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "RawPerfume")]
pub struct PerfumeMention {
    pub brand: String,
    pub name: String,
    pub description: String,
    pub rating: Option<Rating>,
    pub rating_reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Positive,
    Negative,
    Neutral,
}

impl Rating {
    /// Accepts the English labels and the backend's Spanish ones.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" | "positiva" | "positivo" => Some(Self::Positive),
            "negative" | "negativa" | "negativo" => Some(Self::Negative),
            "neutral" | "neutra" | "neutro" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

/// Wire shape of a perfume entry; every field is optional and the backend
/// uses Spanish keys.
#[derive(Deserialize)]
struct RawPerfume {
    #[serde(default, alias = "marca")]
    brand: Option<String>,
    #[serde(default, alias = "nombre")]
    name: Option<String>,
    #[serde(default, alias = "descripcion", alias = "descripción")]
    description: Option<String>,
    #[serde(default, alias = "valoracion", alias = "valoración")]
    rating: Option<String>,
    #[serde(default, alias = "razon_valoracion", alias = "razón_valoración")]
    rating_reason: Option<String>,
}

impl From<RawPerfume> for PerfumeMention {
    fn from(raw: RawPerfume) -> Self {
        Self {
            brand: raw.brand.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            rating: raw.rating.as_deref().and_then(Rating::parse),
            rating_reason: raw.rating_reason.unwrap_or_default(),
        }
    }
}

/// The `analysis` field after normalization. The backend sometimes sends a
/// string that is not valid JSON; callers get that text back untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisField {
    Structured(Map<String, Value>),
    Unparsed(String),
}

impl AnalysisField {
    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Structured(map) => Some(map),
            Self::Unparsed(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Structured(map) => Value::Object(map.clone()),
            Self::Unparsed(text) => Value::String(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAnalysisResponse {
    /// The payload exactly as it was handed to [`normalize`].
    pub raw: Value,
    pub analysis: Option<AnalysisField>,
    /// `None` when the payload carries no usable perfume list.
    pub perfumes: Option<Vec<PerfumeMention>>,
}

impl NormalizedAnalysisResponse {
    /// Canonical structured form. Normalizing it again yields the same
    /// `analysis` and `perfumes`.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        if let Some(analysis) = &self.analysis {
            out.insert("analysis".into(), analysis.to_value());
        }
        if let Some(perfumes) = &self.perfumes {
            out.insert("perfumes".into(), perfumes_to_value(perfumes));
        }
        Value::Object(out)
    }

    pub fn perfumes_or_empty(&self) -> &[PerfumeMention] {
        self.perfumes.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationErrorKind {
    MalformedPayload,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    #[error("analysis payload could not be decoded: {reason}")]
    MalformedPayload { raw_payload: String, reason: String },
}

impl NormalizationError {
    pub fn kind(&self) -> NormalizationErrorKind {
        match self {
            Self::MalformedPayload { .. } => NormalizationErrorKind::MalformedPayload,
        }
    }

    pub fn raw_payload(&self) -> &str {
        match self {
            Self::MalformedPayload { raw_payload, .. } => raw_payload,
        }
    }
}

/// Normalize an HTTP response body. A body that is valid JSON is decoded
/// first; anything else is treated as a string payload.
pub fn normalize_body(body: &str) -> Result<NormalizedAnalysisResponse, NormalizationError> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => normalize(&value),
        Err(_) => normalize(&Value::String(body.to_string())),
    }
}

pub fn normalize(payload: &Value) -> Result<NormalizedAnalysisResponse, NormalizationError> {
    let mut envelope = match payload {
        Value::Object(map) => map.clone(),
        Value::String(text) => decode_envelope(text)?,
        other => {
            return Err(NormalizationError::MalformedPayload {
                raw_payload: other.to_string(),
                reason: format!("expected an object or a string, got {}", kind_name(other)),
            })
        }
    };

    let mut analysis = match envelope.remove("analysis") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(decode_analysis(text)),
        Some(Value::Object(map)) => Some(AnalysisField::Structured(map)),
        Some(other) => {
            warn!(kind = kind_name(&other), "ignoring non-object analysis field");
            None
        }
    };

    let perfumes = match analysis.as_mut() {
        Some(AnalysisField::Structured(map)) if has_value(map.get("perfumes")) => {
            let decoded = map.get("perfumes").and_then(decode_perfumes);
            // Keep the canonical analysis in sync with what was decoded.
            if let Some(list) = &decoded {
                map.insert("perfumes".into(), perfumes_to_value(list));
            }
            decoded
        }
        _ => envelope.get("perfumes").and_then(decode_perfumes),
    };

    if perfumes.is_none() {
        debug!("no perfume list in analysis payload");
    }

    Ok(NormalizedAnalysisResponse {
        raw: payload.clone(),
        analysis,
        perfumes,
    })
}

/// Lenient deserializer for embedded perfume lists, e.g.
/// `VideoRecord::perfume_analysis`. Undecodable lists become `None`.
pub fn deserialize_perfumes<'de, D>(deserializer: D) -> Result<Option<Vec<PerfumeMention>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decode_perfumes))
}

/// Undo the escaping artifacts left by double serialization.
pub fn clean_escaped_json(text: &str) -> String {
    text.replace("\\n", "")
        .replace("\\\"", "\"")
        .replace("\"{", "{")
        .replace("}\"", "}")
        .replace('\\', "")
}

fn decode_envelope(text: &str) -> Result<Map<String, Value>, NormalizationError> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return Ok(map);
    }

    let cleaned = clean_escaped_json(text);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(NormalizationError::MalformedPayload {
            raw_payload: text.to_string(),
            reason: format!("decoded to {} instead of an object", kind_name(&other)),
        }),
        Err(err) => Err(NormalizationError::MalformedPayload {
            raw_payload: text.to_string(),
            reason: err.to_string(),
        }),
    }
}

fn decode_analysis(text: String) -> AnalysisField {
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => AnalysisField::Structured(map),
        Ok(other) => {
            warn!(kind = kind_name(&other), "analysis string is not an object; keeping text");
            AnalysisField::Unparsed(text)
        }
        Err(err) => {
            warn!(error = %err, "analysis string is not valid JSON; keeping text");
            AnalysisField::Unparsed(text)
        }
    }
}

fn decode_perfumes(value: &Value) -> Option<Vec<PerfumeMention>> {
    let parsed;
    let list = match value {
        Value::Array(items) => items,
        Value::String(text) => {
            parsed = match serde_json::from_str::<Value>(text) {
                Ok(v) => v,
                Err(err) => {
                    warn!(error = %err, "perfume list string is not valid JSON");
                    return None;
                }
            };
            match &parsed {
                Value::Array(items) => items,
                other => {
                    warn!(kind = kind_name(other), "perfume list is not a sequence");
                    return None;
                }
            }
        }
        Value::Null => return None,
        other => {
            warn!(kind = kind_name(other), "perfume list is not a sequence");
            return None;
        }
    };

    let mentions = list
        .iter()
        .filter_map(|item| match PerfumeMention::deserialize(item) {
            Ok(mention) => Some(mention),
            Err(err) => {
                warn!(error = %err, "skipping malformed perfume entry");
                None
            }
        })
        .collect();

    Some(mentions)
}

fn perfumes_to_value(perfumes: &[PerfumeMention]) -> Value {
    Value::Array(
        perfumes
            .iter()
            .map(|mention| {
                let mut entry = Map::new();
                entry.insert("brand".into(), Value::String(mention.brand.clone()));
                entry.insert("name".into(), Value::String(mention.name.clone()));
                entry.insert("description".into(), Value::String(mention.description.clone()));
                if let Some(rating) = mention.rating {
                    entry.insert("rating".into(), Value::String(rating_key(rating).into()));
                }
                entry.insert(
                    "rating_reason".into(),
                    Value::String(mention.rating_reason.clone()),
                );
                Value::Object(entry)
            })
            .collect(),
    )
}

fn rating_key(rating: Rating) -> &'static str {
    match rating {
        Rating::Positive => "positive",
        Rating::Negative => "negative",
        Rating::Neutral => "neutral",
    }
}

/// Null and blank strings count as absent, so lookup falls through to the
/// top-level list.
fn has_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(_) => true,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escaped_analysis_string_yields_perfumes() {
        let body = r#"{"analysis": "{\"perfumes\": [{\"marca\":\"Dior\"}]}"}"#;
        let out = normalize(&Value::String(body.into())).unwrap();

        let perfumes = out.perfumes.expect("perfumes present");
        assert_eq!(perfumes.len(), 1);
        assert_eq!(perfumes[0].brand, "Dior");
        assert!(matches!(out.analysis, Some(AnalysisField::Structured(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = normalize(&json!("not json at all")).unwrap_err();
        assert_eq!(err.kind(), NormalizationErrorKind::MalformedPayload);
        assert_eq!(err.raw_payload(), "not json at all");
    }

    #[test]
    fn scalar_payload_is_malformed() {
        let err = normalize(&json!(42)).unwrap_err();
        assert_eq!(err.raw_payload(), "42");
    }

    #[test]
    fn string_decoding_to_scalar_is_malformed() {
        assert!(normalize(&json!("17")).is_err());
    }

    #[test]
    fn empty_analysis_has_no_perfumes() {
        let out = normalize(&json!({ "analysis": {} })).unwrap();
        assert!(out.perfumes.is_none());
        assert_eq!(out.analysis, Some(AnalysisField::Structured(Map::new())));
    }

    #[test]
    fn unparseable_analysis_is_kept_as_text() {
        let out = normalize(&json!({ "analysis": "the model said no" })).unwrap();
        assert_eq!(
            out.analysis,
            Some(AnalysisField::Unparsed("the model said no".into()))
        );
        assert!(out.perfumes.is_none());
    }

    #[test]
    fn top_level_perfumes_are_used_when_analysis_has_none() {
        let out = normalize(&json!({
            "success": true,
            "analysis": { "summary": "short" },
            "perfumes": "[{\"marca\":\"Chanel\",\"nombre\":\"Bleu\",\"valoracion\":\"positiva\"}]"
        }))
        .unwrap();

        let perfumes = out.perfumes.unwrap();
        assert_eq!(perfumes[0].brand, "Chanel");
        assert_eq!(perfumes[0].name, "Bleu");
        assert_eq!(perfumes[0].rating, Some(Rating::Positive));
    }

    #[test]
    fn blank_analysis_perfumes_fall_back_to_top_level() {
        let out = normalize(&json!({
            "analysis": { "perfumes": "" },
            "perfumes": [{ "marca": "Dior" }]
        }))
        .unwrap();

        let perfumes = out.perfumes.unwrap();
        assert_eq!(perfumes.len(), 1);
        assert_eq!(perfumes[0].brand, "Dior");
    }

    #[test]
    fn non_sequence_perfumes_are_absent() {
        let out = normalize(&json!({ "perfumes": { "marca": "Dior" } })).unwrap();
        assert!(out.perfumes.is_none());

        let out = normalize(&json!({ "perfumes": "[broken" })).unwrap();
        assert!(out.perfumes.is_none());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let out = normalize(&json!({
            "perfumes": [ "Dior Sauvage", { "marca": "Creed", "nombre": "Aventus" }, { "marca": 7 } ]
        }))
        .unwrap();
        let perfumes = out.perfumes.unwrap();
        assert_eq!(perfumes.len(), 1);
        assert_eq!(perfumes[0].name, "Aventus");
    }

    #[test]
    fn unknown_rating_is_dropped_and_neutral_is_kept() {
        let out = normalize(&json!({
            "perfumes": [
                { "marca": "Zara", "valoracion": "meh" },
                { "marca": "Lacoste", "valoracion": "neutra" }
            ]
        }))
        .unwrap();
        let perfumes = out.perfumes.unwrap();
        assert_eq!(perfumes[0].rating, None);
        assert_eq!(perfumes[1].rating, Some(Rating::Neutral));
    }

    #[test]
    fn double_encoded_body_is_decoded() {
        let inner = json!({
            "success": true,
            "analysis": "{\"perfumes\": [{\"marca\": \"Tom Ford\", \"nombre\": \"Oud Wood\"}]}"
        })
        .to_string();
        let body = serde_json::to_string(&inner).unwrap();

        let out = normalize_body(&body).unwrap();
        assert_eq!(out.perfumes.unwrap()[0].name, "Oud Wood");
    }

    #[test]
    fn cleanup_strips_escape_artifacts() {
        let cleaned = clean_escaped_json(r#"{\"a\": \"{\"b\": 1}\"\n}"#);
        assert_eq!(cleaned, r#"{"a": {"b": 1}}"#);
    }

    #[test]
    fn normalization_is_idempotent_for_structured_input() {
        let input = json!({
            "analysis": {
                "perfumes": [
                    { "marca": "Dior", "nombre": "Sauvage", "descripcion": "Fresh", "valoracion": "positiva", "razon_valoracion": "Versatile" }
                ],
                "summary": "One perfume reviewed"
            }
        });

        let first = normalize(&input).unwrap();
        let second = normalize(&first.to_value()).unwrap();

        assert_eq!(first.analysis, second.analysis);
        assert_eq!(first.perfumes, second.perfumes);
        assert_eq!(first.raw, input);
    }

    #[test]
    fn analysis_perfume_string_is_written_back_as_array() {
        let out = normalize(&json!({
            "analysis": { "perfumes": "[{\"brand\": \"Byredo\"}]" }
        }))
        .unwrap();

        let analysis = out.analysis.as_ref().and_then(AnalysisField::as_structured).unwrap();
        assert!(analysis["perfumes"].is_array());
        assert_eq!(out.perfumes_or_empty()[0].brand, "Byredo");
    }
}
