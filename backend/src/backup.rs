use ncm_backup_core::{
    api::{Login, PlaylistDetail, UserAccount, UserPlaylist},
    crypto::md5_hex,
    http::Session,
    model::Playlist,
    Client, NcmError,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::{Account, BackupConfig};
use crate::error::BackupError;
use crate::report::{self, BackupData, Summary};

pub struct Backup {
    client: Client,
    account: Account,
    config: BackupConfig,
}

impl Backup {
    pub fn new(client: Client, account: Account, config: BackupConfig) -> Self {
        Self {
            client,
            account,
            config,
        }
    }

    /// Reuse the saved session if the server still accepts it.
    async fn restore_session(&self) -> Option<i64> {
        let path = self.config.session_file.as_ref()?;
        let data = tokio::fs::read_to_string(path).await.ok()?;
        if !self.client.load_cookie(&data) {
            return None;
        }
        match self.client.request(&UserAccount::default()).await {
            Ok(rsp) => rsp.profile.map(|p| p.user_id),
            Err(e) => {
                warn!("Saved session rejected: {}", e);
                None
            }
        }
    }

    async fn save_session(&self) {
        if let Some(path) = &self.config.session_file {
            if let Err(e) = tokio::fs::write(path, self.client.save_cookie()).await {
                warn!("Failed to save session to {}: {}", path.display(), e);
            }
        }
    }

    pub async fn login(&self) -> Result<i64, BackupError> {
        if let Some(uid) = self.restore_session().await {
            info!("Session restored, user id: {}", uid);
            return Ok(uid);
        }

        info!("Logging in as {}", self.account.email);
        let login = Login::new(&self.account.email, &self.account.password)
            .map_err(|e| BackupError::Login(NcmError::from(e)))?;
        let rsp = self
            .client
            .request(&login)
            .await
            .map_err(BackupError::Login)?;
        info!("Logged in, user id: {}", rsp.account.id);
        self.save_session().await;
        Ok(rsp.account.id)
    }

    /// Pages through `/user/playlist` until the server reports no more.
    pub async fn user_playlists(&self, uid: i64) -> Result<Vec<Playlist>, BackupError> {
        let mut playlists = Vec::new();
        loop {
            let offset = playlists.len() as i64;
            let rsp = self.client.request(&UserPlaylist::new(uid, offset)).await?;
            let fetched = rsp.playlist.len();
            playlists.extend(rsp.playlist);
            if !rsp.more || fetched == 0 {
                break;
            }
        }
        info!("Found {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Cover failures are logged and never fail the playlist.
    async fn download_cover(&self, url: &str, dir: &Path) -> Option<String> {
        if !self.config.download_cover || url.is_empty() {
            return None;
        }
        match self.save_cover(url, dir).await {
            Ok(f) => f,
            Err(e) => {
                warn!("Failed to download cover {}: {}", url, e);
                None
            }
        }
    }

    /// Named by the MD5 of the url so repeated runs overwrite one file.
    async fn save_cover(&self, url: &str, dir: &Path) -> Result<Option<String>, BackupError> {
        let Some(data) = self.client.fetch(url).await? else {
            return Ok(None);
        };
        let filename = format!("{}.jpg", md5_hex(url.as_bytes()).map_err(NcmError::from)?);
        tokio::fs::write(dir.join(&filename), &data).await?;
        Ok(Some(filename))
    }

    pub async fn backup_playlist(&self, playlist: &Playlist) -> Result<BackupData, BackupError> {
        info!("Backing up playlist {} ({})", playlist.name, playlist.id);

        let detail = self
            .client
            .request(&PlaylistDetail::new(playlist.id))
            .await?
            .playlist;
        // a detail without `tracks` is an empty playlist, not a failure
        let tracks = detail.tracks.unwrap_or_default();

        let dir = self
            .config
            .save_path
            .join(report::safe_name(&playlist.name, playlist.id));
        tokio::fs::create_dir_all(&dir).await?;

        let cover_url = playlist.cover_img_url.as_deref().unwrap_or("");
        let cover_file = self.download_cover(cover_url, &dir).await;

        let data = BackupData::new(playlist, &tracks, cover_file);
        for song in &data.songs {
            info!("  {}. {} - {}", song.order, song.name, song.artist);
        }
        write_playlist(&dir, &data).await?;

        info!("Saved to {}", dir.display());
        Ok(data)
    }

    pub async fn backup_all(&self) -> Result<Summary, BackupError> {
        let uid = self.login().await?;
        tokio::fs::create_dir_all(&self.config.save_path).await?;

        let playlists = self.user_playlists(uid).await?;
        if playlists.is_empty() {
            warn!("No playlist found");
        }

        let mut results = Vec::new();
        for playlist in &playlists {
            match self.backup_playlist(playlist).await {
                Ok(data) => results.push(data),
                Err(e) => error!("Failed to back up playlist {}: {}", playlist.id, e),
            }
        }

        let summary = Summary::new(uid, &results, chrono::Local::now().to_rfc3339());
        let path = write_summary(&self.config.save_path, &summary).await?;
        info!(
            "Backed up {} of {} playlists to {}",
            results.len(),
            playlists.len(),
            path.display()
        );
        Ok(summary)
    }
}

pub async fn write_playlist(dir: &Path, data: &BackupData) -> Result<(), BackupError> {
    tokio::fs::write(dir.join(report::PLAYLIST_JSON), data.to_json()?).await?;
    tokio::fs::write(dir.join(report::PLAYLIST_TXT), data.to_text()).await?;
    Ok(())
}

pub async fn write_summary(dir: &Path, summary: &Summary) -> Result<PathBuf, BackupError> {
    let path = dir.join(report::SUMMARY_JSON);
    tokio::fs::write(&path, serde_json::to_string_pretty(summary)?).await?;
    Ok(path)
}
