use serde_json::Value;

use crate::domain::customer::birth_date::matches_date_pattern;
use crate::domain::customer::cpf::matches_cpf_pattern;
use crate::domain::customer::{MALFORMED_CPF, MALFORMED_DATE};

// ============================================================================
// Request Body Schemas
// ============================================================================
//
// Shape checks run before the body reaches the domain service. Unlike the
// service, every violation is collected so the client sees all of them at
// once.
//
// ============================================================================

const NAME_ACCENTS: &str = "áàâãéèêíïóôõöúçñÁÀÂÃÉÈÍÏÓÔÕÖÚÇÑ";

struct FieldRule {
    key: &'static str,
    required: &'static str,
    empty: &'static str,
    pattern: fn(&str) -> bool,
    pattern_message: &'static str,
}

const CUSTOMER_FIELDS: &[FieldRule] = &[
    FieldRule {
        key: "name",
        required: "'Name' is a required field",
        empty: "The 'name' field is not allowed to be empty",
        pattern: is_plain_name,
        pattern_message: "Special characters are not allowed",
    },
    FieldRule {
        key: "cpf",
        required: "'cpf' is a required field",
        empty: "The 'cpf' field is not allowed to be empty",
        pattern: matches_cpf_pattern,
        pattern_message: MALFORMED_CPF,
    },
    FieldRule {
        key: "birth_date",
        required: "'birth_date' is a required field",
        empty: "The 'birth_date' field is not allowed to be empty",
        pattern: matches_date_pattern,
        pattern_message: MALFORMED_DATE,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Customer,
}

impl Schema {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "customer" => Some(Schema::Customer),
            _ => None,
        }
    }

    fn fields(&self) -> &'static [FieldRule] {
        match self {
            Schema::Customer => CUSTOMER_FIELDS,
        }
    }

    /// Check `body` against the schema, returning every violation found.
    pub fn validate(&self, body: &Value) -> Result<(), Vec<String>> {
        let Some(object) = body.as_object() else {
            return Err(vec!["\"value\" must be of type object".to_string()]);
        };

        let fields = self.fields();
        let mut messages = Vec::new();

        for rule in fields {
            match object.get(rule.key) {
                None | Some(Value::Null) => messages.push(rule.required.to_string()),
                Some(Value::String(raw)) => {
                    let value = raw.trim();
                    if value.is_empty() {
                        messages.push(rule.empty.to_string());
                    } else if !(rule.pattern)(value) {
                        messages.push(rule.pattern_message.to_string());
                    }
                }
                Some(_) => messages.push(format!("\"{}\" must be a string", rule.key)),
            }
        }

        for key in object.keys() {
            if !fields.iter().any(|rule| rule.key == key.as_str()) {
                messages.push(format!("\"{key}\" is not allowed"));
            }
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(messages)
        }
    }
}

fn is_plain_name(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == '\'' || c.is_whitespace() || NAME_ACCENTS.contains(c))
}
