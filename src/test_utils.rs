pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::ad_placement::{AdFormat, AdPlacement};
    use crate::models::domain::task::{QuizQuestion, VideoTask};

    /// A task with a two-question quiz, the common case in tests.
    pub fn quiz_task() -> VideoTask {
        VideoTask::new(
            "Rust in 10 minutes",
            "A quick tour of the language",
            "https://www.youtube.com/watch?v=Jk79QKCvpGk",
            vec![
                QuizQuestion {
                    id: "q-1".to_string(),
                    text: "What keyword introduces a function?".to_string(),
                    correct_answer: Some("fn".to_string()),
                },
                QuizQuestion {
                    id: "q-2".to_string(),
                    text: "Name something the borrow checker prevents.".to_string(),
                    correct_answer: None,
                },
            ],
        )
    }

    /// A task with no quiz attached.
    pub fn plain_task() -> VideoTask {
        VideoTask::new(
            "Conference keynote",
            "Just watch it",
            "https://youtu.be/zXC0KvNKNMc",
            vec![],
        )
    }

    pub fn rewarded_placement(points_reward: i64) -> AdPlacement {
        AdPlacement {
            placement_key: "home_screen_rewarded".to_string(),
            ad_format: AdFormat::Rewarded,
            is_enabled: true,
            points_reward,
            ad_unit_id: "ca-app-pub-0000000000000000/1111111111".to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn interstitial_placement() -> AdPlacement {
        AdPlacement {
            placement_key: "level_break_interstitial".to_string(),
            ad_format: AdFormat::Interstitial,
            is_enabled: true,
            points_reward: 0,
            ad_unit_id: "ca-app-pub-0000000000000000/2222222222".to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz_task() {
        let task = quiz_task();
        assert!(task.has_quiz());
        assert_eq!(task.questions.len(), 2);
        assert_eq!(task.video_id(), Some("Jk79QKCvpGk"));
    }

    #[test]
    fn test_fixtures_plain_task() {
        let task = plain_task();
        assert!(!task.has_quiz());
    }

    #[test]
    fn test_fixtures_placements() {
        assert!(rewarded_placement(5).is_enabled);
        assert_eq!(rewarded_placement(5).points_reward, 5);
        assert_eq!(
            interstitial_placement().ad_format,
            crate::models::domain::ad_placement::AdFormat::Interstitial
        );
    }
}
