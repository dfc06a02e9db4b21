//! Alias-tolerant resolution of token claims.
//!
//! The backend has gone through several generations of claim naming; the same
//! logical field may arrive under any of its historical spellings. Each
//! logical field has one explicit, ordered alias list: the first alias present
//! in the claim record wins.

use serde_json::{Map, Value};

use crate::constants::ROLE_DEALER;

// Ordered alias tables, most recent spelling first.
const ID_ALIASES: [&str; 5] = ["sub", "id", "userId", "user_id", "uid"];
const EMAIL_ALIASES: [&str; 3] = ["email", "mail", "correo"];
const NAME_ALIASES: [&str; 4] = ["name", "nombre", "username", "fullName"];
const ROLE_ALIASES: [&str; 4] = ["role", "rol", "roles", "perfil"];
const PERMISSION_ALIASES: [&str; 3] = ["permissions", "permisos", "scopes"];
const AGENT_NAME_ALIASES: [&str; 2] = ["agentName", "agente"];
const DEALER_NAME_ALIASES: [&str; 2] = ["dealerName", "distribuidor"];
const GROUP_ID_ALIASES: [&str; 2] = ["groupId", "grupo"];
const CREDIT_ALIASES: [&str; 3] = ["credit", "credito", "saldo"];

/// Identity fields extracted from a decoded claim record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClaims {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Raw role value as found in the token; never empty (defaults to dealer).
    pub role: String,
    pub permissions: Vec<String>,
    pub agent_name: Option<String>,
    pub dealer_name: Option<String>,
    pub group_id: Option<String>,
    pub credit: Option<f64>,
}

/// Resolve a claim record into identity fields.
///
/// Returns `None` only when no user id alias is present, in which case the
/// token identifies nobody and is treated as malformed by callers.
pub fn resolve_claims(claims: &Map<String, Value>) -> Option<ResolvedClaims> {
    let user_id = first_string(claims, &ID_ALIASES)?;

    Some(ResolvedClaims {
        user_id,
        email: first_string(claims, &EMAIL_ALIASES),
        name: first_string(claims, &NAME_ALIASES),
        role: first_string(claims, &ROLE_ALIASES).unwrap_or_else(|| ROLE_DEALER.to_string()),
        permissions: string_list(claims, &PERMISSION_ALIASES),
        agent_name: first_string(claims, &AGENT_NAME_ALIASES),
        dealer_name: first_string(claims, &DEALER_NAME_ALIASES),
        group_id: first_string(claims, &GROUP_ID_ALIASES),
        credit: first_number(claims, &CREDIT_ALIASES),
    })
}

/// First alias whose value is a non-empty string, a number, or an array whose
/// first element is a string (legacy multi-role tokens).
fn first_string(claims: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| as_string(claims.get(*alias)?))
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.first().and_then(as_string),
        _ => None,
    }
}

/// First alias carrying a list of strings; a bare string is treated as a
/// single-element list.
fn string_list(claims: &Map<String, Value>, aliases: &[&str]) -> Vec<String> {
    for alias in aliases {
        match claims.get(*alias) {
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
            }
            Some(Value::String(s)) if !s.is_empty() => return vec![s.clone()],
            _ => {}
        }
    }
    Vec::new()
}

fn first_number(claims: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    for alias in aliases {
        match claims.get(*alias) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.parse::<f64>() {
                    return Some(parsed);
                }
            }
            _ => {}
        }
    }
    None
}
