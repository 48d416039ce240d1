// Rule sets for the account screens

use crate::complexity::{PasswordComplexity, build_complexity_validators};
use crate::compare::CompareOptions;
use crate::{FieldRule, FieldRules, Validator};

/// Sign-in: `username` and `password`.
pub fn login_rules() -> FieldRules {
    FieldRules::new()
        .field("username", FieldRule::required())
        .field("password", FieldRule::required())
}

/// Password recovery request: `username`.
pub fn forgot_password_rules() -> FieldRules {
    FieldRules::new().field("username", FieldRule::required())
}

/// Recovery question: `answer`.
pub fn security_question_rules() -> FieldRules {
    FieldRules::new().field("answer", FieldRule::required())
}

/// New password under `complexity`, confirmed by a second entry that must
/// equal `new_password`.
pub fn change_password_rules(complexity: Option<&PasswordComplexity>, new_password: &str) -> FieldRules {
    FieldRules::new()
        .field(
            "newPassword",
            FieldRule::required().with_validators(build_complexity_validators(complexity)),
        )
        .field(
            "confirmPassword",
            FieldRule::required().with(Validator::Compare(CompareOptions::string_equals(new_password))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engine;
    use serde_json::{Value, json};

    #[test]
    fn test_login() {
        let rules = login_rules();
        assert_eq!(rules.names().collect::<Vec<_>>(), ["username", "password"]);

        let report = Engine::default()
            .check_form(&json!({"username": "jdoe", "password": ""}), &rules)
            .unwrap();
        assert_eq!(report.invalid_fields().len(), 1);
        assert!(report.contains("password"));
    }

    #[test]
    fn test_recovery_forms() {
        assert!(forgot_password_rules().get("username").unwrap().required);
        assert!(security_question_rules().get("answer").unwrap().required);
    }

    #[test]
    fn test_change_password() {
        let policy = PasswordComplexity::new().min_length(8).min_number(1);
        let rules = change_password_rules(Some(&policy), "hunter2hunter");
        let engine = Engine::default();

        let ok = json!({"newPassword": "hunter2hunter", "confirmPassword": "hunter2hunter"});
        assert!(engine.check_form(&ok, &rules).unwrap().is_valid());

        let mismatch = json!({"newPassword": "hunter2hunter", "confirmPassword": "hunter3hunter"});
        let report = engine.check_form(&mismatch, &rules).unwrap();
        assert_eq!(report.invalid_fields()[0].field, "confirmPassword");

        let weak = json!({"newPassword": "short", "confirmPassword": "short"});
        let weak_rules = change_password_rules(Some(&policy), "short");
        let report = engine.check_form(&weak, &weak_rules).unwrap();
        assert!(report.contains("newPassword"));
        assert!(!report.contains("confirmPassword"));
    }

    #[test]
    fn test_change_password_without_policy() {
        let rules = change_password_rules(None, "x");
        assert_eq!(rules.get("newPassword").unwrap().validators.as_ref().map(|v| v.len()), Some(0));
        let rules_json: Value = serde_json::to_value(&rules).unwrap();
        assert_eq!(rules_json["confirmPassword"]["validators"][0]["type"], "COMPARE");
    }
}
