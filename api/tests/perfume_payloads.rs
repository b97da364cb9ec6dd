//! Payload shapes observed from `/api/analyze-perfumes`, end to end through
//! `normalize_body`.

use api::{normalize_body, AnalysisField, NormalizationErrorKind, Rating};

#[test]
fn plain_json_envelope() {
    let body = r#"{
        "success": true,
        "analysis": {
            "perfumes": [
                {
                    "marca": "Dior",
                    "nombre": "Sauvage",
                    "descripcion": "Bergamota y ambroxan",
                    "valoracion": "positiva",
                    "razon_valoracion": "Versátil y duradero"
                },
                {
                    "marca": "Zara",
                    "nombre": "Vibrant Leather",
                    "descripcion": "Cuero especiado",
                    "valoracion": "negativa",
                    "razon_valoracion": "Poca duración"
                }
            ]
        }
    }"#;

    let out = normalize_body(body).unwrap();
    let perfumes = out.perfumes_or_empty();
    assert_eq!(perfumes.len(), 2);
    assert_eq!(perfumes[0].description, "Bergamota y ambroxan");
    assert_eq!(perfumes[0].rating, Some(Rating::Positive));
    assert_eq!(perfumes[1].rating, Some(Rating::Negative));
    assert_eq!(perfumes[1].rating_reason, "Poca duración");
}

#[test]
fn analysis_serialized_by_the_model() {
    // The model's JSON output is stored as a string and then wrapped again.
    let body = r#"{"success": true, "analysis": "{\n  \"perfumes\": [\n    {\"marca\": \"Creed\", \"nombre\": \"Aventus\", \"valoracion\": \"positiva\"}\n  ]\n}"}"#;

    let out = normalize_body(body).unwrap();
    assert!(matches!(out.analysis, Some(AnalysisField::Structured(_))));
    assert_eq!(out.perfumes_or_empty()[0].name, "Aventus");
}

#[test]
fn whole_body_is_a_json_string_with_escapes() {
    let inner = r#"{\"success\": true, \"analysis\": \"{\"perfumes\": [{\"marca\": \"Chanel\", \"nombre\": \"Bleu\"}]}\"}"#;

    let out = normalize_body(inner).unwrap();
    let perfumes = out.perfumes.expect("perfumes decoded after cleanup");
    assert_eq!(perfumes[0].brand, "Chanel");
    assert_eq!(perfumes[0].name, "Bleu");
}

#[test]
fn no_perfumes_is_not_an_error() {
    let out = normalize_body(r#"{"success": true, "analysis": {"perfumes": []}}"#).unwrap();
    assert_eq!(out.perfumes, Some(Vec::new()));

    let out = normalize_body(r#"{"success": true}"#).unwrap();
    assert!(out.perfumes.is_none());
    assert!(out.analysis.is_none());
}

#[test]
fn html_error_page_is_malformed() {
    let err = normalize_body("<html><body>502 Bad Gateway</body></html>").unwrap_err();
    assert_eq!(err.kind(), NormalizationErrorKind::MalformedPayload);
    assert!(err.raw_payload().contains("502"));
}
