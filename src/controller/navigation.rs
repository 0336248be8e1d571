//! Episode list loading and detail navigation

use crate::model::PREFETCH_COUNT;

use super::AppController;

/// How many episodes the list view fetches
const EPISODE_PAGE_LIMIT: u32 = 12;

impl AppController {
    /// Fetch the episode list and show it in the content area.
    pub async fn load_episodes(&self) {
        let model = self.model.lock().await;
        model.set_content_loading(true).await;
        drop(model);

        match self.api.list_episodes(EPISODE_PAGE_LIMIT).await {
            Ok(episodes) => {
                let model = self.model.lock().await;
                model.set_episode_list(episodes).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Episode list load failed");
                let model = self.model.lock().await;
                model.set_content_loading(false).await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Open the detail view for the episode under the cursor.
    ///
    /// Served from the disk cache while the cached record is inside the
    /// revalidation window, otherwise refetched and re-cached.
    pub async fn open_selected_episode(&self) {
        let model = self.model.lock().await;
        let Some(selected) = model.get_selected_episode().await else {
            return;
        };
        drop(model);

        if let Some(cached) = self.cache.load(&selected.id) {
            let model = self.model.lock().await;
            model.set_episode_detail(cached).await;
            return;
        }

        let model = self.model.lock().await;
        model.set_content_loading(true).await;
        drop(model);

        match self.api.get_episode(&selected.id).await {
            Ok(episode) => {
                if let Err(e) = self.cache.store(&episode) {
                    tracing::warn!(episode_id = %episode.id, error = %e, "Could not cache episode");
                }
                let model = self.model.lock().await;
                model.set_episode_detail(episode).await;
            }
            Err(e) => {
                tracing::error!(episode_id = %selected.id, error = %e, "Episode detail load failed");
                let model = self.model.lock().await;
                model.set_content_loading(false).await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Warm the cache with the most recent episodes, the ones a listener is
    /// most likely to open first. Failures here are silent; the detail view
    /// falls back to the API.
    pub async fn warm_recent_episodes(&self) {
        let recent = match self.api.list_episodes(PREFETCH_COUNT).await {
            Ok(recent) => recent,
            Err(e) => {
                tracing::debug!(error = %e, "Cache warm-up list fetch failed");
                return;
            }
        };

        for episode in recent {
            if self.cache.load(&episode.id).is_some() {
                continue;
            }
            match self.api.get_episode(&episode.id).await {
                Ok(detail) => {
                    if let Err(e) = self.cache.store(&detail) {
                        tracing::debug!(episode_id = %detail.id, error = %e, "Cache warm-up store failed");
                    } else {
                        tracing::debug!(episode_id = %detail.id, "Episode prefetched into cache");
                    }
                }
                Err(e) => {
                    tracing::debug!(episode_id = %episode.id, error = %e, "Cache warm-up fetch failed");
                }
            }
        }
    }
}
