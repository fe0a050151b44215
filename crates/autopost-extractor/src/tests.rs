//! Integration tests for the enrichment pipeline

#[cfg(test)]
mod tests {
    use crate::{EnrichmentPipeline, ExtractorConfig, ExtractorError};
    use autopost_domain::{Language, Length, RawPost, SpellingNormalizer};
    use autopost_llm::{MockProvider, RecordingSleeper, ResilientInvoker, RetryPolicy};
    use autopost_store::{CorpusStore, StoreError};
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    const UNIFY_FRAGMENT: &str = "list of tags";

    fn pipeline(llm: MockProvider, config: ExtractorConfig) -> EnrichmentPipeline<MockProvider> {
        let invoker = Arc::new(ResilientInvoker::new(RetryPolicy::immediate(3)));
        EnrichmentPipeline::new(Arc::new(llm), invoker, config).unwrap()
    }

    fn mock_with_unify(unify: &str) -> MockProvider {
        let mut llm = MockProvider::new(r#"{"line_count": 1, "language": "English", "tags": []}"#);
        llm.add_response(UNIFY_FRAGMENT, unify);
        llm
    }

    #[test]
    fn test_full_enrichment_flow() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "First day at work",
            r#"{"line_count": 3, "language": "English", "tags": ["Fresh Graduates"]}"#,
        );
        llm.add_response(
            "Interview la",
            r#"{"line_count": 7, "language": "Tanglish", "tags": ["Recent Graduates", "Motivation"]}"#,
        );
        llm.add_response(
            UNIFY_FRAGMENT,
            r#"{"Fresh Graduates": "Freshers", "Recent Graduates": "Freshers"}"#,
        );

        let pipeline = pipeline(llm.clone(), ExtractorConfig::default());
        let (posts, report) = pipeline
            .enrich(vec![
                RawPost::new("First day at work, so excited!"),
                RawPost::new("Interview la reject aana kooda keep going"),
            ])
            .unwrap();

        assert_eq!(posts[0].tags, vec!["Freshers"]);
        assert_eq!(posts[1].tags, vec!["Freshers", "Motivation"]);
        assert_eq!(posts[1].length(), Length::Medium);
        assert_eq!(report.posts_processed, 2);
        assert_eq!(report.tags_before, 3);
        assert_eq!(report.tags_after, 2);
        // two extractions plus one unification
        assert_eq!(llm.call_count(), 3);
    }

    #[test]
    fn test_tanglish_text_normalized() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "rombha",
            r#"{"line_count": 1, "language": "Tanglish", "tags": ["Motivation"]}"#,
        );
        llm.add_response(UNIFY_FRAGMENT, "{}");

        let pipeline = pipeline(llm, ExtractorConfig::default());
        let (posts, report) = pipeline
            .enrich(vec![RawPost::new("Idhu rombha mukkiyam")])
            .unwrap();

        assert_eq!(posts[0].text, "Idhu romba mukkiyam");
        assert_eq!(report.posts_normalized, 1);
    }

    #[test]
    fn test_english_text_not_normalized() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "rombha",
            r#"{"line_count": 1, "language": "English", "tags": ["Motivation"]}"#,
        );
        llm.add_response(UNIFY_FRAGMENT, "{}");

        let pipeline = pipeline(llm, ExtractorConfig::default());
        let (posts, _) = pipeline.enrich(vec![RawPost::new("rombha")]).unwrap();
        assert_eq!(posts[0].text, "rombha");
    }

    #[test]
    fn test_normalization_disabled() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "rombha",
            r#"{"line_count": 1, "language": "Tanglish", "tags": ["Motivation"]}"#,
        );
        llm.add_response(UNIFY_FRAGMENT, "{}");

        let mut config = ExtractorConfig::default();
        config.normalize_tanglish_text = false;
        let (posts, report) = pipeline(llm, config)
            .enrich(vec![RawPost::new("rombha")])
            .unwrap();

        assert_eq!(posts[0].text, "rombha");
        assert_eq!(report.posts_normalized, 0);
    }

    #[test]
    fn test_custom_spelling_table() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "seri",
            r#"{"line_count": 1, "language": "Tanglish", "tags": ["Motivation"]}"#,
        );
        llm.add_response(UNIFY_FRAGMENT, "{}");

        let table = SpellingNormalizer::from_pairs([("seri", "sari")]).unwrap();
        let pipeline = pipeline(llm, ExtractorConfig::default()).with_normalizer(Some(table));
        let (posts, _) = pipeline.enrich(vec![RawPost::new("seri, paakalam")]).unwrap();
        assert_eq!(posts[0].text, "sari, paakalam");
    }

    #[test]
    fn test_process_corpus_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw_posts.json");
        let output = dir.path().join("processed_posts.json");
        fs::write(
            &input,
            r#"[{"text": "Keep applying!", "likes": 12}, {"text": "Network every day."}]"#,
        )
        .unwrap();

        let mut llm = MockProvider::default();
        llm.add_response(
            "Keep applying",
            r#"{"line_count": 1, "language": "English", "tags": ["Job Hunting"]}"#,
        );
        llm.add_response(
            "Network every day",
            r#"{"line_count": 1, "language": "English", "tags": ["Networking"]}"#,
        );
        llm.add_response(UNIFY_FRAGMENT, r#"{"Job Hunting": "Job Search"}"#);

        let report = pipeline(llm, ExtractorConfig::default())
            .process_corpus(&input, &output)
            .unwrap();
        assert_eq!(report.posts_processed, 2);
        assert!(report.summary().contains("Job Hunting -> Job Search"));

        let store = CorpusStore::load(&output).unwrap();
        assert_eq!(store.tags(), vec!["Job Search", "Networking"]);
        assert_eq!(store.posts()[0].extra.get("likes"), Some(&serde_json::json!(12)));
        assert_eq!(
            store
                .filter(Length::Short, Language::English, "Job Search")
                .count(),
            1
        );
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempdir().unwrap();
        let llm = MockProvider::default();
        let result = pipeline(llm.clone(), ExtractorConfig::default()).process_corpus(
            &dir.path().join("missing.json"),
            &dir.path().join("out.json"),
        );

        assert!(matches!(
            result,
            Err(ExtractorError::Store(StoreError::NotFound(_)))
        ));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_post_without_text_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw_posts.json");
        fs::write(&input, r#"[{"text": "fine"}, {"body": "no text field"}]"#).unwrap();

        let llm = mock_with_unify("{}");
        let result = pipeline(llm.clone(), ExtractorConfig::default())
            .process_corpus(&input, &dir.path().join("out.json"));

        assert!(matches!(
            result,
            Err(ExtractorError::Store(StoreError::InvalidPost { index: 1, .. }))
        ));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_failed_post_aborts_batch_without_writing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw_posts.json");
        let output = dir.path().join("processed_posts.json");
        fs::write(&input, r#"[{"text": "good post"}, {"text": "bad post"}]"#).unwrap();

        let mut llm = mock_with_unify("{}");
        llm.add_response("bad post", r#"{"line_count": 1, "language": "Klingon", "tags": []}"#);

        let result = pipeline(llm, ExtractorConfig::default()).process_corpus(&input, &output);
        assert!(result.unwrap_err().is_schema());
        assert!(!output.exists());
    }

    #[test]
    fn test_exhausted_retries_back_off() {
        let sleeper = RecordingSleeper::new();
        let invoker = Arc::new(
            ResilientInvoker::new(RetryPolicy::default())
                .with_seed(42)
                .with_sleeper(sleeper.clone()),
        );
        let llm = MockProvider::failing("503 Service Unavailable");
        let pipeline =
            EnrichmentPipeline::new(Arc::new(llm.clone()), invoker, ExtractorConfig::default())
                .unwrap();

        let result = pipeline.enrich(vec![RawPost::new("Anything")]);
        assert!(matches!(result, Err(ExtractorError::Service { attempts: 3, .. })));
        assert_eq!(llm.call_count(), 3);

        let delays = sleeper.delays();
        assert_eq!(delays.len(), 2);
        assert!(delays[0] <= delays[1]);
    }

    #[test]
    fn test_empty_corpus_makes_no_calls() {
        let llm = MockProvider::default();
        let (posts, report) = pipeline(llm.clone(), ExtractorConfig::default())
            .enrich(Vec::new())
            .unwrap();

        assert!(posts.is_empty());
        assert_eq!(report.tags_after, 0);
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExtractorConfig::default();
        config.max_tags = 0;
        let invoker = Arc::new(ResilientInvoker::default());
        let result = EnrichmentPipeline::new(Arc::new(MockProvider::default()), invoker, config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}
