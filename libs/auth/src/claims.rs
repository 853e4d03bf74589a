use serde::{Deserialize, Serialize};

use crate::ANY_ID;

/// Identity carried by a validated bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Platform user id, [`ANY_ID`] for service tokens.
    pub sub: String,
    /// Ids of the courses this user has purchased.
    #[serde(default)]
    pub courses: Vec<u32>,
    pub exp: u64,
}

impl Claims {
    pub fn wildcard() -> Self {
        Self {
            sub: ANY_ID.to_string(),
            courses: Vec::new(),
            exp: 0,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.sub == ANY_ID
    }

    /// Whether this identity may generate media for `course_id`.
    pub fn entitled(&self, course_id: u32) -> bool {
        self.is_wildcard() || self.courses.contains(&course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_entitled_everywhere() {
        let claims = Claims::wildcard();
        assert!(claims.is_wildcard());
        assert!(claims.entitled(1));
        assert!(claims.entitled(999));
    }

    #[test]
    fn test_entitled_only_for_purchased() {
        let claims = Claims {
            sub: "u42".to_string(),
            courses: vec![2, 7],
            exp: 0,
        };
        assert!(!claims.is_wildcard());
        assert!(claims.entitled(2));
        assert!(claims.entitled(7));
        assert!(!claims.entitled(3));
    }
}
