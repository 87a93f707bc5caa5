/*
 * Responsibility
 * - Rating 投稿の request DTO
 * - voter identity はログインユーザではなく呼び出し元のネットワーク識別子 (ip)
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub ip: String,
    pub rating: i32,
}

impl RatingRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.ip.trim().is_empty() {
            return Err("ip is required");
        }
        if !(1..=5).contains(&self.rating) {
            return Err("rating must be between 1 and 5");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        for value in 1..=5 {
            let req = RatingRequest {
                ip: "1.2.3.4".into(),
                rating: value,
            };
            assert!(req.validate().is_ok());
        }
        for value in [0, 6, -1] {
            let req = RatingRequest {
                ip: "1.2.3.4".into(),
                rating: value,
            };
            assert!(req.validate().is_err());
        }
    }

    #[test]
    fn empty_voter_identity_is_rejected() {
        let req = RatingRequest {
            ip: "  ".into(),
            rating: 3,
        };
        assert!(req.validate().is_err());
    }
}
