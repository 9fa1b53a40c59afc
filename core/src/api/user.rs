use serde::{Deserialize, Serialize};

use super::Api;
use crate::model::{Playlist, UserProfile};

pub const PAGE_SIZE: i64 = 50;

/// Current session's account; `profile` is null when not logged in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserAccount {}

#[derive(Debug, Deserialize)]
pub struct UserAccountResponse {
    pub code: i64,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl Api for UserAccount {
    type Output = UserAccountResponse;
    const PATH: &'static str = "/nuser/account/get";
}

/// Created and subscribed playlists of a user, private ones included for the
/// logged in owner.
#[derive(Debug, Clone, Serialize)]
pub struct UserPlaylist {
    pub uid: i64,
    pub limit: i64,
    pub offset: i64,
}

impl UserPlaylist {
    pub fn new(uid: i64, offset: i64) -> Self {
        Self {
            uid,
            limit: PAGE_SIZE,
            offset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserPlaylistResponse {
    #[serde(default)]
    pub playlist: Vec<Playlist>,
    #[serde(default)]
    pub more: bool,
}

impl Api for UserPlaylist {
    type Output = UserPlaylistResponse;
    const PATH: &'static str = "/user/playlist";
}
