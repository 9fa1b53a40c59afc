use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod login;
pub mod playlist;
pub mod user;

pub use login::{Login, LoginResponse};
pub use playlist::{PlaylistDetail, PlaylistDetailResponse};
pub use user::{UserAccount, UserAccountResponse, UserPlaylist, UserPlaylistResponse};

/// A weapi endpoint. The implementing type serializes to the JSON body.
pub trait Api: Serialize {
    type Output: DeserializeOwned;

    /// Path below `/weapi`.
    const PATH: &'static str;
}
