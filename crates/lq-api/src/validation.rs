use validator::Validate;

use crate::error::ApiError;

/// Run `validator` derive checks and flatten the result into an `ApiError`.
///
/// Invalid event data must be rejected here, before any storage write.
pub fn check<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| format!("invalid value for {field}"), |m| m.to_string())
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        ApiError::Validation(message)
    })
}

/// Cross-field check the derive attributes cannot express.
pub fn validate_quiz_score(score: i32, max_score: i32) -> Result<(), ApiError> {
    if score > max_score {
        return Err(ApiError::Validation(format!(
            "score {score} exceeds max score {max_score}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::model::{LessonCompleteRequest, QuizCompleteRequest};
    use uuid::Uuid;

    fn quiz_request(score: i32, max_score: i32, percentage: f64) -> QuizCompleteRequest {
        QuizCompleteRequest {
            user_id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            lesson_id: Uuid::new_v4(),
            score,
            max_score,
            percentage,
        }
    }

    #[test]
    fn test_negative_watch_time_is_rejected() {
        let request = LessonCompleteRequest {
            user_id: Uuid::new_v4(),
            lesson_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            watch_time_seconds: -1,
        };
        assert!(matches!(check(&request), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_valid_lesson_request_passes() {
        let request = LessonCompleteRequest {
            user_id: Uuid::new_v4(),
            lesson_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            watch_time_seconds: 540,
        };
        assert!(check(&request).is_ok());
    }

    #[test]
    fn test_percentage_outside_range_is_rejected() {
        assert!(check(&quiz_request(5, 10, 101.0)).is_err());
        assert!(check(&quiz_request(5, 10, -0.5)).is_err());
        assert!(check(&quiz_request(5, 10, 100.0)).is_ok());
    }

    #[test]
    fn test_zero_max_score_is_rejected() {
        assert!(check(&quiz_request(0, 0, 0.0)).is_err());
    }

    #[test]
    fn test_score_above_max_is_rejected() {
        assert!(validate_quiz_score(11, 10).is_err());
        assert!(validate_quiz_score(10, 10).is_ok());
    }
}
