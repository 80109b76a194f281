//! Book recommendations from a user's borrowing history

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::recommendation::{Recommendation, RecommendationBasis},
    repository::RecommendationsRepository,
};

#[derive(Clone)]
pub struct RecommendationsService {
    recommendations: Arc<dyn RecommendationsRepository>,
}

impl RecommendationsService {
    pub fn new(recommendations: Arc<dyn RecommendationsRepository>) -> Self {
        Self { recommendations }
    }

    pub async fn by_category(&self, user_id: Uuid) -> AppResult<Recommendation> {
        self.recommend(user_id, RecommendationBasis::Category).await
    }

    pub async fn by_author(&self, user_id: Uuid) -> AppResult<Recommendation> {
        self.recommend(user_id, RecommendationBasis::Author).await
    }

    /// Unread books from the user's most borrowed category or author
    async fn recommend(&self, user_id: Uuid, basis: RecommendationBasis) -> AppResult<Recommendation> {
        let favorite = match basis {
            RecommendationBasis::Category => self.recommendations.favorite_category(user_id).await?,
            RecommendationBasis::Author => self.recommendations.favorite_author(user_id).await?,
        };

        let Some(favorite) = favorite else {
            tracing::debug!("No borrowing history for user {}", user_id);
            return Ok(Recommendation::without_history(user_id));
        };

        let books = match basis {
            RecommendationBasis::Category => {
                self.recommendations.unread_in_category(user_id, favorite).await?
            }
            RecommendationBasis::Author => {
                self.recommendations.unread_by_author(user_id, favorite).await?
            }
        };

        tracing::debug!(
            "{} books recommended to user {} from {:?} {}",
            books.len(),
            user_id,
            basis,
            favorite
        );

        Ok(Recommendation {
            user_id,
            based_on: Some(favorite),
            recommended_books: books,
            reason: basis.reason().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recommendation::NO_HISTORY_REASON;
    use crate::repository::recommendations::MockRecommendationsRepository;

    #[tokio::test]
    async fn no_history_gives_an_empty_recommendation() {
        let mut repo = MockRecommendationsRepository::new();
        repo.expect_favorite_category().returning(|_| Ok(None));
        repo.expect_favorite_author().returning(|_| Ok(None));
        repo.expect_unread_in_category().never();
        repo.expect_unread_by_author().never();

        let service = RecommendationsService::new(Arc::new(repo));
        let user_id = Uuid::new_v4();

        for recommendation in [
            service.by_category(user_id).await.unwrap(),
            service.by_author(user_id).await.unwrap(),
        ] {
            assert_eq!(recommendation.user_id, user_id);
            assert!(recommendation.based_on.is_none());
            assert!(recommendation.recommended_books.is_empty());
            assert_eq!(recommendation.reason, NO_HISTORY_REASON);
        }
    }

    #[tokio::test]
    async fn category_recommendation_uses_the_favorite_category() {
        let category = Uuid::new_v4();
        let books = vec![Uuid::new_v4(), Uuid::new_v4()];
        let expected = books.clone();

        let mut repo = MockRecommendationsRepository::new();
        repo.expect_favorite_category().returning(move |_| Ok(Some(category)));
        repo.expect_unread_in_category()
            .withf(move |_, c| *c == category)
            .returning(move |_, _| Ok(books.clone()));

        let service = RecommendationsService::new(Arc::new(repo));
        let recommendation = service.by_category(Uuid::new_v4()).await.unwrap();
        assert_eq!(recommendation.based_on, Some(category));
        assert_eq!(recommendation.recommended_books, expected);
        assert_eq!(recommendation.reason, "Based on your favorite category.");
    }

    #[tokio::test]
    async fn author_recommendation_may_be_empty_when_everything_was_read() {
        let author = Uuid::new_v4();
        let mut repo = MockRecommendationsRepository::new();
        repo.expect_favorite_author().returning(move |_| Ok(Some(author)));
        repo.expect_unread_by_author().returning(|_, _| Ok(Vec::new()));

        let service = RecommendationsService::new(Arc::new(repo));
        let recommendation = service.by_author(Uuid::new_v4()).await.unwrap();
        assert_eq!(recommendation.based_on, Some(author));
        assert!(recommendation.recommended_books.is_empty());
        assert_eq!(recommendation.reason, "Based on your favorite author.");
    }
}
