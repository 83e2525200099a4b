//! File pipeline integration tests: upload, list, summary, translation

use axum::http::StatusCode;
use filechat_llm::mock::MockOutcome;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{
    get_request, json_request, multipart_request, parse_body, upload_request, Part, TestApp,
};

mod test_upload {
    use super::*;

    #[tokio::test]
    async fn test_upload_stores_file() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "note.txt", "hello world");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["message"], "File saved successfully.");
        assert_eq!(
            body["file_path"],
            app.uploads_dir().join("note.txt").display().to_string()
        );
        assert_eq!(app.stored("note.txt").as_deref(), Some("hello world"));
        assert_eq!(app.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_overwrites_previous_version() {
        let app = TestApp::new().await.unwrap();

        for content in ["first", "second"] {
            let req = upload_request("/file/upload", "note.txt", content);
            let resp = app.test_router().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        assert_eq!(app.stored("note.txt").as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_upload_accepts_long_name() {
        let app = TestApp::new().await.unwrap();
        let long = format!("{}.txt", "a".repeat(240));

        let req = upload_request("/file/upload", &long, "hello");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.stored(&long).as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_translate_upload_with_unnameable_artifact_is_400() {
        let app = TestApp::new().await.unwrap();
        let long = format!("{}.txt", "b".repeat(240));

        let req = upload_request("/file/translate", &long, "hola");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(app.stored(&long).is_none());
        assert_eq!(app.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_extension() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "note.md", "hello");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("file must have the .txt extension"));
        assert!(app.stored("note.md").is_none());
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_content() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "big.txt", &"a".repeat(1001));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(app.stored("big.txt").is_none());
    }

    #[tokio::test]
    async fn test_upload_accepts_content_at_limit() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "edge.txt", &"é".repeat(1000));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_content() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "empty.txt", "");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal_name() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "../escape.txt", "hello");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(!app.uploads_dir().join("../escape.txt").exists());
    }

    #[tokio::test]
    async fn test_upload_without_file_part() {
        let app = TestApp::new().await.unwrap();

        let req = multipart_request(
            "/file/upload",
            &[Part::Text {
                name: "other",
                value: "x",
            }],
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_utf8() {
        let app = TestApp::new().await.unwrap();

        let req = multipart_request(
            "/file/upload",
            &[Part::File {
                filename: "bin.txt",
                content: &[0xff, 0xfe, 0x00],
            }],
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

mod test_list {
    use super::*;

    #[tokio::test]
    async fn test_list_includes_originals_and_derived() {
        let app = TestApp::new().await.unwrap();
        app.seed("note.txt", "hello");

        let req = json_request("/file/summary", json!({"filename": "note.txt"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .test_router()
            .oneshot(get_request("/file/list"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            parse_body(resp).await,
            json!({"files": ["note.summary.txt", "note.txt"]})
        );
    }
}

mod test_summary {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_summarize_by_name() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/upload", "note.txt", "hello");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let req = json_request("/file/summary", json!({"filename": "note.txt"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        let summary = body["summary"]["summary_content"].as_str().unwrap();
        assert_eq!(
            summary,
            "Mock response to: Summarize the following content: hello"
        );
        assert_eq!(app.stored("note.summary.txt").as_deref(), Some(summary));
        assert_eq!(app.stored("note.txt").as_deref(), Some("hello"));
    }

    #[test_log::test(tokio::test)]
    async fn test_summary_by_name_writes_artifact() {
        let app = TestApp::with_outcome(MockOutcome::Reply("short".to_string()))
            .await
            .unwrap();
        app.seed("note.txt", "a rather long text");

        let req = json_request("/file/summary", json!({"filename": "note.txt"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Summary generated successfully.");
        assert_eq!(body["summary"]["summary_content"], "short");
        assert_eq!(
            body["summary"]["summary_file_path"],
            app.uploads_dir()
                .join("note.summary.txt")
                .display()
                .to_string()
        );
        assert_eq!(app.stored("note.summary.txt").as_deref(), Some("short"));
        assert_eq!(app.stored("note.txt").as_deref(), Some("a rather long text"));

        let requests = app.llm.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].prompt,
            "Summarize the following content: a rather long text"
        );
    }

    #[tokio::test]
    async fn test_summary_of_upload_stores_both_files() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/summary", "report.txt", "quarterly numbers");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        let expected = "Mock response to: Summarize the following content: quarterly numbers";
        assert_eq!(body["summary"]["summary_content"], expected);
        assert_eq!(app.stored("report.txt").as_deref(), Some("quarterly numbers"));
        assert_eq!(app.stored("report.summary.txt").as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn test_summary_of_missing_file_is_404() {
        let app = TestApp::new().await.unwrap();

        let req = json_request("/file/summary", json!({"filename": "missing.txt"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(app.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_summary_without_file_or_name_is_400() {
        let app = TestApp::new().await.unwrap();

        let req = json_request("/file/summary", json!({}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_summary_rejects_traversal_name() {
        let app = TestApp::new().await.unwrap();

        let req = json_request("/file/summary", json!({"filename": "../etc/passwd"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_response_leaves_no_artifact() {
        let app = TestApp::with_outcome(MockOutcome::Incomplete).await.unwrap();
        app.seed("note.txt", "hello");

        let req = json_request("/file/summary", json!({"filename": "note.txt"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "MODEL_ERROR");
        assert!(app.stored("note.summary.txt").is_none());
    }

    #[tokio::test]
    async fn test_unavailable_backend_keeps_uploaded_original() {
        let app = TestApp::with_outcome(MockOutcome::Unavailable).await.unwrap();

        let req = upload_request("/file/summary", "note.txt", "hello");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(app.stored("note.txt").as_deref(), Some("hello"));
        assert!(app.stored("note.summary.txt").is_none());
    }
}

mod test_translate {
    use super::*;

    #[tokio::test]
    async fn test_translate_by_name() {
        let app = TestApp::with_outcome(MockOutcome::Reply("Hello".to_string()))
            .await
            .unwrap();
        app.seed("saludo.txt", "Hola");

        let req = json_request(
            "/file/translate",
            json!({"filename": "saludo.txt", "target_language": "en"}),
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Translation completed successfully.");
        assert_eq!(body["translated_content"], "Hello");
        assert_eq!(
            body["translated_file_path"],
            app.uploads_dir()
                .join("saludo.translated.en.txt")
                .display()
                .to_string()
        );
        assert_eq!(
            app.stored("saludo.translated.en.txt").as_deref(),
            Some("Hello")
        );
        assert_eq!(
            app.llm.recorded_requests()[0].prompt,
            "Translate the following content to en: Hola"
        );
    }

    #[tokio::test]
    async fn test_translate_upload_uses_default_language() {
        let app = TestApp::new().await.unwrap();

        let req = upload_request("/file/translate", "saludo.txt", "Hola");
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        assert!(app.stored("saludo.translated.English.txt").is_some());
        assert_eq!(
            app.llm.recorded_requests()[0].prompt,
            "Translate the following content to English: Hola"
        );
    }

    #[tokio::test]
    async fn test_translate_upload_with_language_field() {
        let app = TestApp::new().await.unwrap();

        let req = multipart_request(
            "/file/translate",
            &[
                Part::File {
                    filename: "saludo.txt",
                    content: b"Hola",
                },
                Part::Text {
                    name: "target_language",
                    value: "fr",
                },
            ],
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(app.stored("saludo.translated.fr.txt").is_some());
    }

    #[tokio::test]
    async fn test_translate_rejects_path_like_language() {
        let app = TestApp::new().await.unwrap();
        app.seed("saludo.txt", "Hola");

        let req = json_request(
            "/file/translate",
            json!({"filename": "saludo.txt", "target_language": "../x"}),
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_translate_missing_language_in_json_is_400() {
        let app = TestApp::new().await.unwrap();
        app.seed("saludo.txt", "Hola");

        let req = json_request("/file/translate", json!({"filename": "saludo.txt"}));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_translate_missing_file_is_404() {
        let app = TestApp::new().await.unwrap();

        let req = json_request(
            "/file/translate",
            json!({"filename": "missing.txt", "target_language": "en"}),
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_translate_text_touches_no_files() {
        let app = TestApp::with_outcome(MockOutcome::Reply("Good morning".to_string()))
            .await
            .unwrap();

        let req = json_request(
            "/chat/translate",
            json!({"content": "Buenos días", "target_language": "English"}),
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(
            body,
            json!({
                "message": "Translation completed successfully.",
                "translated_content": "Good morning"
            })
        );
        assert_eq!(
            app.llm.recorded_requests()[0].prompt,
            "Translate to English: Buenos días"
        );
        assert!(std::fs::read_dir(app.uploads_dir()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_translate_text_requires_content() {
        let app = TestApp::new().await.unwrap();

        let req = json_request(
            "/chat/translate",
            json!({"content": "", "target_language": "English"}),
        );
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
