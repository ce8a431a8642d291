//! Flat-file repository for CRUD operations.
//!
//! Every operation is a whole-file read-modify-write over one JSON
//! collection. Files are re-read fresh on each call; nothing is cached
//! across requests. A missing or corrupt file reads as an empty
//! collection so a bad write never takes the dashboard down.

use std::path::PathBuf;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{
    Bet, CreateBetRequest, CreateNameRequest, CreateOfferRequest, CreateWishlistRequest,
    NameSuggestion, Offer, VoteChoice, VoteType, WishlistItem, UNKNOWN_VOTER,
};
use crate::sanitize::{clean_opt, clean_text};

pub const NAMES_FILE: &str = "names.json";
pub const WISHLIST_FILE: &str = "wishlist.json";
pub const BETS_FILE: &str = "bets.json";
pub const OFFERS_FILE: &str = "offers.json";

/// Flat-file repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    data_dir: PathBuf,
}

impl Repository {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Read a collection file, treating missing or corrupt content as empty.
    async fn load<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.data_dir.join(file);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!("Failed to read {}: {}", path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("Corrupt collection file {}: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    /// Write a collection file as pretty-printed JSON.
    async fn save<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), AppError> {
        let path = self.data_dir.join(file);
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }

    // ==================== NAME OPERATIONS ====================

    /// List all name suggestions.
    pub async fn list_names(&self) -> Vec<NameSuggestion> {
        self.load(NAMES_FILE).await
    }

    /// Create a new name suggestion.
    pub async fn create_name(
        &self,
        request: &CreateNameRequest,
    ) -> Result<NameSuggestion, AppError> {
        let mut names: Vec<NameSuggestion> = self.load(NAMES_FILE).await;

        let suggestion = NameSuggestion {
            id: uuid::Uuid::new_v4().to_string(),
            name: clean_text(&request.name),
            votes: 0,
            dislikes: 0,
            voted_by: Default::default(),
        };

        names.push(suggestion.clone());
        self.save(NAMES_FILE, &names).await?;

        Ok(suggestion)
    }

    /// Apply a vote, a vote change, or a withdrawal to a name suggestion.
    ///
    /// A repeat of the voter's current choice is refused with 403 and the
    /// file is not rewritten. The sentinel identity bypasses both the
    /// duplicate check and the decrement step, so unresolvable callers can
    /// vote without limit.
    pub async fn apply_vote(
        &self,
        id: &str,
        voter: &str,
        vote_type: VoteType,
    ) -> Result<NameSuggestion, AppError> {
        let mut names: Vec<NameSuggestion> = self.load(NAMES_FILE).await;

        let record = names
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Name {} not found", id)))?;

        let resolvable = voter != UNKNOWN_VOTER;
        let previous = record.voted_by.get(voter).copied();

        if resolvable {
            let duplicate = matches!(
                (previous, vote_type),
                (Some(VoteChoice::Up), VoteType::Up) | (Some(VoteChoice::Down), VoteType::Down)
            );
            if duplicate {
                return Err(AppError::Forbidden("Already voted".to_string()));
            }

            match previous {
                Some(VoteChoice::Up) => record.votes = record.votes.saturating_sub(1),
                Some(VoteChoice::Down) => record.dislikes = record.dislikes.saturating_sub(1),
                None => {}
            }
        }

        match vote_type {
            VoteType::Up => {
                record.votes += 1;
                record.voted_by.insert(voter.to_string(), VoteChoice::Up);
            }
            VoteType::Down => {
                record.dislikes += 1;
                record.voted_by.insert(voter.to_string(), VoteChoice::Down);
            }
            VoteType::None => {
                record.voted_by.remove(voter);
            }
        }

        let updated = record.clone();
        self.save(NAMES_FILE, &names).await?;

        Ok(updated)
    }

    /// Delete a name suggestion.
    pub async fn delete_name(&self, id: &str) -> Result<(), AppError> {
        let mut names: Vec<NameSuggestion> = self.load(NAMES_FILE).await;

        let before = names.len();
        names.retain(|n| n.id != id);
        if names.len() == before {
            return Err(AppError::NotFound(format!("Name {} not found", id)));
        }

        self.save(NAMES_FILE, &names).await
    }

    // ==================== WISHLIST OPERATIONS ====================

    /// List all wishlist items.
    pub async fn list_wishlist(&self) -> Vec<WishlistItem> {
        self.load(WISHLIST_FILE).await
    }

    /// Create a new wishlist item.
    pub async fn create_wishlist_item(
        &self,
        request: &CreateWishlistRequest,
    ) -> Result<WishlistItem, AppError> {
        let mut items: Vec<WishlistItem> = self.load(WISHLIST_FILE).await;

        let item = WishlistItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: clean_text(&request.name),
            link: request.link.trim().to_string(),
            price: clean_opt(request.price.as_deref()),
            note: clean_opt(request.note.as_deref()),
            reserved: false,
            reserved_by: None,
            created_at: Utc::now().to_rfc3339(),
        };

        items.push(item.clone());
        self.save(WISHLIST_FILE, &items).await?;

        Ok(item)
    }

    /// Toggle an item's reservation.
    ///
    /// Reserving without a name records the reservation as "Anonymous" so
    /// `reservedBy` stays non-null exactly while `reserved` is set.
    pub async fn toggle_reservation(
        &self,
        id: &str,
        reserved_by: Option<&str>,
    ) -> Result<WishlistItem, AppError> {
        let mut items: Vec<WishlistItem> = self.load(WISHLIST_FILE).await;

        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Wishlist item {} not found", id)))?;

        if item.reserved {
            item.reserved = false;
            item.reserved_by = None;
        } else {
            let by = clean_opt(reserved_by);
            item.reserved = true;
            item.reserved_by = Some(if by.is_empty() {
                "Anonymous".to_string()
            } else {
                by
            });
        }

        let updated = item.clone();
        self.save(WISHLIST_FILE, &items).await?;

        Ok(updated)
    }

    /// Delete a wishlist item.
    pub async fn delete_wishlist_item(&self, id: &str) -> Result<(), AppError> {
        let mut items: Vec<WishlistItem> = self.load(WISHLIST_FILE).await;

        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(AppError::NotFound(format!(
                "Wishlist item {} not found",
                id
            )));
        }

        self.save(WISHLIST_FILE, &items).await
    }

    // ==================== BET OPERATIONS ====================

    /// List all bets.
    pub async fn list_bets(&self) -> Vec<Bet> {
        self.load(BETS_FILE).await
    }

    /// Create a new bet.
    pub async fn create_bet(&self, request: &CreateBetRequest) -> Result<Bet, AppError> {
        let mut bets: Vec<Bet> = self.load(BETS_FILE).await;

        let bet = Bet {
            id: uuid::Uuid::new_v4().to_string(),
            name: clean_text(&request.name),
            date: clean_text(&request.date),
            time: request.time.as_deref().map(clean_text),
            weight: request.weight,
            size: request.size,
            submitted_at: Utc::now().to_rfc3339(),
        };

        bets.push(bet.clone());
        self.save(BETS_FILE, &bets).await?;

        Ok(bet)
    }

    /// Delete a bet.
    pub async fn delete_bet(&self, id: &str) -> Result<(), AppError> {
        let mut bets: Vec<Bet> = self.load(BETS_FILE).await;

        let before = bets.len();
        bets.retain(|b| b.id != id);
        if bets.len() == before {
            return Err(AppError::NotFound(format!("Bet {} not found", id)));
        }

        self.save(BETS_FILE, &bets).await
    }

    // ==================== OFFER OPERATIONS ====================

    /// List all offers.
    pub async fn list_offers(&self) -> Vec<Offer> {
        self.load(OFFERS_FILE).await
    }

    /// Create a new offer record.
    ///
    /// The id is supplied by the caller because the image file is named
    /// after it and must be ingested before the record exists.
    pub async fn create_offer(
        &self,
        id: String,
        request: &CreateOfferRequest,
        image_ref: String,
    ) -> Result<Offer, AppError> {
        let mut offers: Vec<Offer> = self.load(OFFERS_FILE).await;

        let offer = Offer {
            id,
            name: clean_text(&request.name),
            email: request
                .email
                .as_deref()
                .map(clean_text)
                .filter(|e| !e.is_empty()),
            description: clean_text(&request.description),
            image_ref,
            submitted_at: Utc::now().to_rfc3339(),
        };

        offers.push(offer.clone());
        self.save(OFFERS_FILE, &offers).await?;

        Ok(offer)
    }

    /// Delete an offer, returning the removed record so the caller can
    /// clean up its image file.
    pub async fn delete_offer(&self, id: &str) -> Result<Offer, AppError> {
        let mut offers: Vec<Offer> = self.load(OFFERS_FILE).await;

        let position = offers
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", id)))?;

        let removed = offers.remove(position);
        self.save(OFFERS_FILE, &offers).await?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::new(temp_dir.path().to_path_buf());
        (temp_dir, repo)
    }

    async fn seed_name(repo: &Repository, name: &str) -> NameSuggestion {
        repo.create_name(&CreateNameRequest {
            name: name.to_string(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_vote_last_choice_wins() {
        let (_tmp, repo) = fixture();
        let created = seed_name(&repo, "Mia").await;

        repo.apply_vote(&created.id, "10.0.0.1", VoteType::Up)
            .await
            .unwrap();
        let record = repo
            .apply_vote(&created.id, "10.0.0.1", VoteType::Down)
            .await
            .unwrap();

        assert_eq!(record.votes, 0);
        assert_eq!(record.dislikes, 1);
        assert_eq!(record.voted_by.get("10.0.0.1"), Some(&VoteChoice::Down));
    }

    #[tokio::test]
    async fn test_vote_withdrawal_restores_counts() {
        let (_tmp, repo) = fixture();
        let created = seed_name(&repo, "Mia").await;

        repo.apply_vote(&created.id, "10.0.0.1", VoteType::Up)
            .await
            .unwrap();
        let record = repo
            .apply_vote(&created.id, "10.0.0.1", VoteType::None)
            .await
            .unwrap();

        assert_eq!(record.votes, 0);
        assert_eq!(record.dislikes, 0);
        assert!(record.voted_by.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_vote_refused_and_counts_unchanged() {
        let (_tmp, repo) = fixture();
        let created = seed_name(&repo, "Mia").await;

        repo.apply_vote(&created.id, "10.0.0.1", VoteType::Up)
            .await
            .unwrap();
        let err = repo
            .apply_vote(&created.id, "10.0.0.1", VoteType::Up)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let names = repo.list_names().await;
        assert_eq!(names[0].votes, 1);
    }

    #[tokio::test]
    async fn test_unknown_voter_bypasses_duplicate_prevention() {
        let (_tmp, repo) = fixture();
        let created = seed_name(&repo, "Mia").await;

        repo.apply_vote(&created.id, UNKNOWN_VOTER, VoteType::Up)
            .await
            .unwrap();
        let record = repo
            .apply_vote(&created.id, UNKNOWN_VOTER, VoteType::Up)
            .await
            .unwrap();

        // No dedup and no decrement for the sentinel identity.
        assert_eq!(record.votes, 2);
    }

    #[tokio::test]
    async fn test_unknown_voter_withdrawal_does_not_decrement() {
        let (_tmp, repo) = fixture();
        let created = seed_name(&repo, "Mia").await;

        repo.apply_vote(&created.id, UNKNOWN_VOTER, VoteType::Up)
            .await
            .unwrap();
        let record = repo
            .apply_vote(&created.id, UNKNOWN_VOTER, VoteType::None)
            .await
            .unwrap();

        assert_eq!(record.votes, 1);
        assert!(record.voted_by.is_empty());
    }

    #[tokio::test]
    async fn test_counters_floor_at_zero() {
        let (_tmp, repo) = fixture();

        // Hand-written record whose counter lags its ledger.
        let skewed = serde_json::json!([{
            "id": "skewed",
            "name": "Mia",
            "votes": 0,
            "dislikes": 0,
            "votedBy": {"10.0.0.1": "up"}
        }]);
        tokio::fs::write(
            repo.data_dir.join(NAMES_FILE),
            serde_json::to_string_pretty(&skewed).unwrap(),
        )
        .await
        .unwrap();

        let record = repo
            .apply_vote("skewed", "10.0.0.1", VoteType::None)
            .await
            .unwrap();

        assert_eq!(record.votes, 0);
    }

    #[tokio::test]
    async fn test_vote_persists_upgraded_legacy_ledger() {
        let (_tmp, repo) = fixture();

        let legacy = serde_json::json!([{
            "id": "old",
            "name": "Mia",
            "votes": 1,
            "dislikes": 0,
            "votedBy": ["10.0.0.1"]
        }]);
        tokio::fs::write(
            repo.data_dir.join(NAMES_FILE),
            serde_json::to_string_pretty(&legacy).unwrap(),
        )
        .await
        .unwrap();

        repo.apply_vote("old", "10.0.0.2", VoteType::Down)
            .await
            .unwrap();

        let raw = tokio::fs::read_to_string(repo.data_dir.join(NAMES_FILE))
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["votedBy"]["10.0.0.1"], "up");
        assert_eq!(parsed[0]["votedBy"]["10.0.0.2"], "down");
    }

    #[tokio::test]
    async fn test_vote_unknown_id_is_not_found() {
        let (_tmp, repo) = fixture();
        let err = repo
            .apply_vote("missing", "10.0.0.1", VoteType::Up)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reservation_toggle_pair_round_trips() {
        let (_tmp, repo) = fixture();
        let item = repo
            .create_wishlist_item(&CreateWishlistRequest {
                name: "Crib".to_string(),
                link: "https://example.com/crib".to_string(),
                price: None,
                note: None,
            })
            .await
            .unwrap();

        let reserved = repo
            .toggle_reservation(&item.id, Some("Grandma"))
            .await
            .unwrap();
        assert!(reserved.reserved);
        assert_eq!(reserved.reserved_by.as_deref(), Some("Grandma"));

        let released = repo.toggle_reservation(&item.id, None).await.unwrap();
        assert!(!released.reserved);
        assert!(released.reserved_by.is_none());
    }

    #[tokio::test]
    async fn test_reservation_without_name_defaults() {
        let (_tmp, repo) = fixture();
        let item = repo
            .create_wishlist_item(&CreateWishlistRequest {
                name: "Crib".to_string(),
                link: "https://example.com/crib".to_string(),
                price: None,
                note: None,
            })
            .await
            .unwrap();

        let reserved = repo.toggle_reservation(&item.id, None).await.unwrap();
        assert_eq!(reserved.reserved_by.as_deref(), Some("Anonymous"));
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let (_tmp, repo) = fixture();
        tokio::fs::write(repo.data_dir.join(BETS_FILE), "{not json")
            .await
            .unwrap();

        assert!(repo.list_bets().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_sanitizes_free_text() {
        let (_tmp, repo) = fixture();
        let created = seed_name(&repo, "  <b>Mia</b> ").await;
        assert_eq!(created.name, "&lt;b&gt;Mia&lt;/b&gt;");
    }
}
