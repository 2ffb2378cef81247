//! Unit tests for the contest crate
//!
//! Pure-layer coverage: entities, DTO wire formats, error mapping.
//! Scoring and policy rules carry their own co-located test modules.

#[cfg(test)]
mod domain_tests {
    use crate::domain::entities::Problem;
    use kernel::id::{ProblemId, UserId};

    fn problem(score_initial: i64, score_now: i64, answer: Option<&str>) -> Problem {
        Problem {
            id: ProblemId::from_i64(1),
            owner_id: UserId::from_i64(1),
            name: "warmup".to_string(),
            description: None,
            answer: answer.map(str::to_string),
            score_initial,
            score_now,
        }
    }

    #[test]
    fn test_accepts_exact_equality() {
        let p = problem(100, 100, Some("flag{x}"));
        assert!(p.accepts("flag{x}"));
        assert!(!p.accepts("flag{y}"));
        assert!(!p.accepts("FLAG{X}"));
        assert!(!p.accepts(""));
    }

    #[test]
    fn test_null_answer_never_accepts() {
        let p = problem(100, 100, None);
        assert!(!p.accepts(""));
        assert!(!p.accepts("anything"));
    }

    #[test]
    fn test_rescale_proportional() {
        // 1000 -> 800 after two solves; doubling the initial keeps the ratio
        let mut p = problem(1000, 800, None);
        p.rescale(2000);
        assert_eq!(p.score_initial, 2000);
        assert_eq!(p.score_now, 1600);
    }

    #[test]
    fn test_rescale_untouched_problem() {
        let mut p = problem(1000, 1000, None);
        p.rescale(500);
        assert_eq!(p.score_initial, 500);
        assert_eq!(p.score_now, 500);
    }

    #[test]
    fn test_rescale_down() {
        let mut p = problem(1000, 900, None);
        p.rescale(100);
        assert_eq!(p.score_initial, 100);
        assert_eq!(p.score_now, 90);
    }
}

#[cfg(test)]
mod models_tests {
    use crate::domain::entities::{Problem, RankEntry};
    use crate::domain::scoring::AnswerOutcome;
    use crate::presentation::dto::*;
    use kernel::id::{ProblemId, UserId};

    fn problem() -> Problem {
        Problem {
            id: ProblemId::from_i64(3),
            owner_id: UserId::from_i64(7),
            name: "crypto-1".to_string(),
            description: Some("warmup".to_string()),
            answer: Some("flag{secret}".to_string()),
            score_initial: 1000,
            score_now: 800,
        }
    }

    #[test]
    fn test_problem_response_redaction() {
        let redacted = ProblemResponse::from_problem(&problem(), false);
        assert!(redacted.answer.is_none());

        let full = ProblemResponse::from_problem(&problem(), true);
        assert_eq!(full.answer.as_deref(), Some("flag{secret}"));
    }

    #[test]
    fn test_problem_response_wire_format() {
        let json =
            serde_json::to_string(&ProblemResponse::from_problem(&problem(), false)).unwrap();
        assert!(json.contains(r#""owner_id":7"#));
        assert!(json.contains(r#""score_initial":1000"#));
        assert!(json.contains(r#""score_now":800"#));
        assert!(json.contains(r#""answer":null"#));
    }

    #[test]
    fn test_answer_response_status() {
        let json =
            serde_json::to_string(&AnswerResponse::from_outcome(AnswerOutcome::Accepted)).unwrap();
        assert!(json.contains(r#""status":"Accepted""#));

        let json =
            serde_json::to_string(&AnswerResponse::from_outcome(AnswerOutcome::Wrong)).unwrap();
        assert!(json.contains(r#""status":"Wrong""#));
    }

    #[test]
    fn test_rank_entry_response() {
        let entry = RankEntry {
            user_id: UserId::from_i64(5),
            name: "alice".to_string(),
            total_score: 1700,
        };
        let json = serde_json::to_string(&RankEntryResponse::from_entry(&entry)).unwrap();
        assert!(json.contains(r#""id":5"#));
        assert!(json.contains(r#""total_score":1700"#));
    }

    #[test]
    fn test_create_request_optional_fields() {
        let req: ProblemCreateRequest =
            serde_json::from_str(r#"{"name":"p","score_initial":100}"#).unwrap();
        assert!(req.description.is_none());
        assert!(req.answer.is_none());
        assert_eq!(req.score_initial, 100);
    }

    #[test]
    fn test_update_request_defaults() {
        let req: ProblemUpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.score_initial.is_none());
    }

    #[test]
    fn test_pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 100);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::ContestError;
    use auth::error::AuthError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_status_codes() {
        let test_cases: Vec<(ContestError, StatusCode)> = vec![
            (ContestError::ProblemNotFound, StatusCode::NOT_FOUND),
            (ContestError::NameTaken, StatusCode::CONFLICT),
            (ContestError::PermissionDenied, StatusCode::FORBIDDEN),
            (
                ContestError::Validation("bad score".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ContestError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_auth_errors_pass_through() {
        let err = ContestError::Auth(AuthError::NotAuthenticated);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ContestError::Auth(AuthError::TokenExpired);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = ContestError::Auth(AuthError::EmailNotBound);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
