use serde::{Deserialize, Serialize};

use super::Api;
use crate::model::Playlist;

pub const DETAIL_TRACKS: i64 = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetail {
    pub id: i64,
    /// Tracks to include in the reply.
    pub n: i64,
}

impl PlaylistDetail {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            n: DETAIL_TRACKS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaylistDetailResponse {
    pub playlist: Playlist,
}

impl Api for PlaylistDetail {
    type Output = PlaylistDetailResponse;
    const PATH: &'static str = "/v3/playlist/detail";
}
