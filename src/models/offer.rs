//! Item-offer model for the peer-to-peer board.

use serde::{Deserialize, Serialize};

/// An item offered by a friend or family member.
///
/// `image_ref` names a derived file under the uploads directory; record
/// and file are created and removed together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub description: String,
    pub image_ref: String,
    pub submitted_at: String,
}

/// Public listing view of an offer.
///
/// The email key is absent entirely, not blanked: key presence itself
/// leaks to some clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOffer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_ref: String,
    pub submitted_at: String,
}

impl From<&Offer> for PublicOffer {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id.clone(),
            name: offer.name.clone(),
            description: offer.description.clone(),
            image_ref: offer.image_ref.clone(),
            submitted_at: offer.submitted_at.clone(),
        }
    }
}

/// Request body for posting an offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub description: String,
    pub image_base64: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_has_no_email_key() {
        let offer = Offer {
            id: "a".to_string(),
            name: "Stroller".to_string(),
            email: Some("aunt@example.com".to_string()),
            description: "Barely used".to_string(),
            image_ref: "/uploads/a.jpg".to_string(),
            submitted_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        let public = serde_json::to_value(PublicOffer::from(&offer)).unwrap();
        assert!(public.get("email").is_none());
        assert_eq!(public["name"], "Stroller");
    }
}
