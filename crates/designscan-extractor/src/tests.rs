//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{render, serialize_document, Extractor, ExtractorConfig, ExtractorError};
    use designscan_domain::{Finding, NOT_APPLICABLE, NOT_FOUND};
    use designscan_gatekeeper::{Gatekeeper, ValidationWarning};
    use designscan_llm::MockProvider;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn categories(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn not_found_reply(categories: &[String]) -> String {
        let items: Vec<Value> = categories
            .iter()
            .map(|c| {
                json!({
                    "category": c,
                    "finding": NOT_FOUND,
                    "confidence": "None",
                    "source": NOT_APPLICABLE,
                })
            })
            .collect();
        Value::Array(items).to_string()
    }

    fn sample_document() -> Value {
        json!({
            "name": "Login Flow",
            "document": {
                "children": [
                    {"name": "Page 1", "children": [{"name": "Frame: Login", "type": "FRAME"}]}
                ]
            },
            "styles": {"S:1": {"name": "Body/Inter 16", "styleType": "TEXT"}}
        })
    }

    #[test]
    fn test_full_extraction_flow() {
        let cats = categories(&["Typography", "Color Scheme", "Form Validation Rules"]);
        let reply = r#"[
            {"category": "Typography", "finding": "Inter 16px body text", "confidence": "High", "source": "styles.S:1"},
            {"category": "Color Scheme", "finding": "Not Found", "confidence": "None", "source": "N/A"},
            {"category": "Form Validation Rules", "finding": "Not Found", "confidence": "None", "source": "N/A"}
        ]"#;
        let extractor = Extractor::new(MockProvider::new(reply), ExtractorConfig::default())
            .with_gatekeeper(Gatekeeper::default_config());

        let result = extractor.extract(&sample_document(), &cats).unwrap();

        assert_eq!(result.findings.len(), 3);
        assert!(result.is_clean(), "unexpected warnings: {:?}", result.warnings);
        assert_eq!(
            result.findings[0].finding.as_deref(),
            Some("Inter 16px body text")
        );
        assert_eq!(result.findings[0].source.as_deref(), Some("styles.S:1"));

        let csv = render(&result.findings).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.contains("Typography,Inter 16px body text,High,styles.S:1\n"));
    }

    #[test]
    fn test_fenced_reply_matches_plain_reply() {
        let cats = categories(&["Typography", "Accessibility Features"]);
        let plain = not_found_reply(&cats);
        let fenced = format!("Here is what I found:\n\n```json\n{}\n```\n\nHope this helps.", plain);

        let direct = Extractor::new(MockProvider::new(plain), ExtractorConfig::default())
            .extract(&sample_document(), &cats)
            .unwrap();
        let recovered = Extractor::new(MockProvider::new(fenced), ExtractorConfig::default())
            .extract(&sample_document(), &cats)
            .unwrap();

        assert_eq!(direct.findings, recovered.findings);
        assert!(!direct.metadata.used_fallback);
        assert!(recovered.metadata.used_fallback);
    }

    #[test]
    fn test_extraction_with_invalid_json() {
        let reply = "Sorry, I cannot analyze this design.";
        let extractor = Extractor::new(MockProvider::new(reply), ExtractorConfig::default());

        let result = extractor.extract(&sample_document(), &categories(&["Typography"]));
        match result {
            Err(ExtractorError::UnparsableResponse { raw, .. }) => assert_eq!(raw, reply),
            other => panic!("Expected UnparsableResponse, got {:?}", other.map(|r| r.findings)),
        }
    }

    #[test]
    fn test_findings_not_repaired() {
        // Wrong order, an unrequested category and a bad label all come back untouched
        let cats = categories(&["Typography", "Color Scheme"]);
        let reply = r#"[
            {"category": "Color Scheme", "finding": "Blue primary", "confidence": "Certain", "source": "Page 1"},
            {"category": "Layout", "finding": "Not Found", "confidence": "None", "source": "N/A"}
        ]"#;
        let extractor = Extractor::new(MockProvider::new(reply), ExtractorConfig::default())
            .with_gatekeeper(Gatekeeper::default_config());

        let result = extractor.extract(&sample_document(), &cats).unwrap();

        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].category.as_deref(), Some("Color Scheme"));
        assert_eq!(result.findings[0].confidence.as_deref(), Some("Certain"));
        assert_eq!(result.findings[1].category.as_deref(), Some("Layout"));

        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::UnknownConfidence { index: 0, .. })));
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::UnexpectedCategory { index: 1, .. })));
        assert!(result.warnings.iter().any(
            |w| matches!(w, ValidationWarning::MissingCategory { category } if category == "Typography")
        ));
    }

    #[test]
    fn test_incomplete_finding_fails_to_render() {
        let reply = r#"[{"category": "Typography", "finding": "Inter", "confidence": "High"}]"#;
        let extractor = Extractor::new(MockProvider::new(reply), ExtractorConfig::default());

        let result = extractor
            .extract(&sample_document(), &categories(&["Typography"]))
            .unwrap();
        assert_eq!(result.findings[0].source, None);

        let err = render(&result.findings).unwrap_err();
        assert!(matches!(err, ExtractorError::FieldMissing { index: 0, .. }));
    }

    #[test]
    fn test_large_document_truncated_before_sending() {
        let provider = MockProvider::new("[]");
        let config = ExtractorConfig {
            max_document_chars: 1_000,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(provider.clone(), config);

        let document = json!({"notes": "é".repeat(5_000)});
        let full = serde_json::to_string_pretty(&document).unwrap();
        let forwarded: String = full.chars().take(1_000).collect();

        let result = extractor
            .extract(&document, &categories(&["Typography"]))
            .unwrap();
        assert!(result.metadata.truncated);
        assert_eq!(result.metadata.forwarded_chars, 1_000);

        let request = provider.last_request().unwrap();
        assert!(request.user.contains(&forwarded));
        assert!(!request.user.contains(&full));
    }

    #[test]
    fn test_every_category_sent() {
        let provider = MockProvider::new("[]");
        let extractor = Extractor::new(provider.clone(), ExtractorConfig::default());
        let cats = ExtractorConfig::default().categories;

        // A document with nothing relevant still asks about every category
        extractor.extract(&json!({}), &cats).unwrap();

        let request = provider.last_request().unwrap();
        for category in &cats {
            assert!(
                request.user.contains(&format!("- {}\n", category)),
                "category '{}' missing from prompt",
                category
            );
        }
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_extract_configured_uses_config_categories() {
        let config = ExtractorConfig {
            categories: categories(&["Design Pattern"]),
            ..ExtractorConfig::default()
        };
        let provider = MockProvider::new(not_found_reply(&config.categories));
        let extractor = Extractor::new(provider, config);

        let result = extractor.extract_configured(&sample_document()).unwrap();
        assert_eq!(result.findings, vec![Finding::not_found("Design Pattern")]);
    }

    #[test]
    fn test_invalid_input_never_reaches_provider() {
        let provider = MockProvider::new("[]");
        let extractor = Extractor::new(provider.clone(), ExtractorConfig::default());

        assert!(matches!(
            extractor.extract(&sample_document(), &[]),
            Err(ExtractorError::InvalidInput(_))
        ));
        assert!(matches!(
            extractor.extract(&sample_document(), &categories(&["A", "B", "A"])),
            Err(ExtractorError::InvalidInput(_))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_same_reply_same_findings() {
        let cats = categories(&["Typography", "Navigation Structure"]);
        let extractor = Extractor::new(
            MockProvider::new(not_found_reply(&cats)),
            ExtractorConfig::default(),
        );

        let first = extractor.extract(&sample_document(), &cats).unwrap();
        let second = extractor.extract(&sample_document(), &cats).unwrap();
        assert_eq!(first.findings, second.findings);
    }

    proptest! {
        #[test]
        fn prop_echoed_categories_round_trip(
            labels in prop::collection::btree_set("[A-Z][a-z]{1,10}( [A-Z][a-z]{1,10})?", 1..8)
        ) {
            let cats: Vec<String> = labels.into_iter().collect();
            let extractor = Extractor::new(
                MockProvider::new(not_found_reply(&cats)),
                ExtractorConfig::default(),
            );

            let result = extractor.extract(&json!({}), &cats).unwrap();
            prop_assert_eq!(result.findings.len(), cats.len());
            for (finding, category) in result.findings.iter().zip(&cats) {
                prop_assert_eq!(finding.category.as_deref(), Some(category.as_str()));
                prop_assert!(finding.is_not_found());
            }

            let csv = render(&result.findings).unwrap();
            prop_assert_eq!(csv.lines().count(), cats.len() + 1);
        }

        #[test]
        fn prop_forwarded_text_never_exceeds_limit(
            text in "\\PC{0,400}",
            max in 1usize..300,
        ) {
            let document = json!({"text": text});
            let excerpt = serialize_document(&document, max).unwrap();
            let full = serde_json::to_string_pretty(&document).unwrap();

            prop_assert_eq!(excerpt.text.chars().count(), excerpt.original_chars.min(max));
            prop_assert!(full.starts_with(&excerpt.text));
            prop_assert_eq!(excerpt.truncated, excerpt.original_chars > max);
        }
    }
}
