use ncm_backup_core::model::{Playlist, Track};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

pub const PLAYLIST_JSON: &str = "playlist.json";
pub const PLAYLIST_TXT: &str = "playlist.txt";
pub const SUMMARY_JSON: &str = "backup_summary.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongInfo {
    pub id: i64,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub url: String,
    pub order: usize,
}

impl SongInfo {
    pub fn from_track(track: &Track, order: usize) -> Self {
        Self {
            id: track.id,
            name: track.name.clone(),
            artist: track.artist_names(),
            album: track.album_name().to_string(),
            url: song_url(track.id),
            order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    pub playlist_id: i64,
    pub name: String,
    pub description: String,
    pub cover_url: String,
    pub cover_file: Option<String>,
    pub song_count: usize,
    pub created_time: Option<i64>,
    pub updated_time: Option<i64>,
    pub privacy: i64,
    pub songs: Vec<SongInfo>,
}

impl BackupData {
    /// `summary` comes from the playlist list, `tracks` from its detail.
    pub fn new(summary: &Playlist, tracks: &[Track], cover_file: Option<String>) -> Self {
        let songs: Vec<SongInfo> = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| SongInfo::from_track(t, i + 1))
            .collect();
        Self {
            playlist_id: summary.id,
            name: summary.name.clone(),
            description: summary.description.clone().unwrap_or_default(),
            cover_url: summary.cover_img_url.clone().unwrap_or_default(),
            cover_file,
            song_count: songs.len(),
            created_time: summary.create_time,
            updated_time: summary.update_time,
            privacy: summary.privacy,
            songs,
        }
    }

    pub fn is_private(&self) -> bool {
        self.privacy == ncm_backup_core::model::PRIVACY_PRIVATE
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Plain text listing written next to `playlist.json`.
    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        fn opt(v: Option<i64>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        writeln!(out, "歌单名称: {}", self.name)?;
        writeln!(out, "歌单ID: {}", self.playlist_id)?;
        writeln!(out, "简介: {}", self.description)?;
        writeln!(out, "歌曲数量: {}", self.song_count)?;
        writeln!(out, "创建时间: {}", opt(self.created_time))?;
        writeln!(out, "更新时间: {}", opt(self.updated_time))?;
        writeln!(
            out,
            "隐私设置: {}",
            if self.is_private() { "私密" } else { "公开" }
        )?;
        writeln!(
            out,
            "封面: {}",
            self.cover_file.as_deref().unwrap_or("未下载")
        )?;
        write!(out, "\n{}\n", "=".repeat(50))?;
        write!(out, "歌曲列表:\n\n")?;

        for song in &self.songs {
            writeln!(out, "{}. {} - {}", song.order, song.name, song.artist)?;
            writeln!(out, "   专辑: {}", song.album)?;
            write!(out, "   URL: {}\n\n", song.url)?;
        }
        Ok(())
    }
}

impl fmt::Display for BackupData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub name: String,
    pub id: i64,
    pub song_count: usize,
    pub privacy: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub user_id: i64,
    pub total_playlists: usize,
    pub backup_time: String,
    pub playlists: Vec<SummaryEntry>,
}

impl Summary {
    pub fn new(user_id: i64, results: &[BackupData], backup_time: String) -> Self {
        Self {
            user_id,
            total_playlists: results.len(),
            backup_time,
            playlists: results
                .iter()
                .map(|p| SummaryEntry {
                    name: p.name.clone(),
                    id: p.playlist_id,
                    song_count: p.song_count,
                    privacy: p.privacy,
                })
                .collect(),
        }
    }
}

pub fn song_url(id: i64) -> String {
    format!("https://music.163.com/#/song?id={}", id)
}

/// Directory name for a playlist: alphanumerics, space, `-` and `_`, trimmed.
/// Falls back to the id when nothing is left.
pub fn safe_name(name: &str, id: i64) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let trimmed = filtered.trim();
    if trimmed.is_empty() {
        id.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncm_backup_core::model::{Album, Artist};

    fn track(id: i64, name: &str, artists: &[&str], album: &str) -> Track {
        Track {
            id,
            name: name.to_string(),
            ar: artists
                .iter()
                .map(|a| Artist {
                    id: 0,
                    name: Some(a.to_string()),
                })
                .collect(),
            al: Some(Album {
                id: 0,
                name: Some(album.to_string()),
                pic_url: None,
            }),
        }
    }

    fn sample() -> BackupData {
        let summary = Playlist {
            id: 99,
            name: "我喜欢的音乐".to_string(),
            description: None,
            cover_img_url: Some("http://p1.music.126.net/c.jpg".to_string()),
            create_time: Some(1000),
            update_time: None,
            privacy: 10,
            ..Default::default()
        };
        let tracks = vec![
            track(1, "晴天", &["周杰伦"], "叶惠美"),
            track(2, "Duet", &["A", "B"], "Pair"),
        ];
        BackupData::new(&summary, &tracks, Some("abc.jpg".to_string()))
    }

    #[test]
    fn test_safe_name() {
        assert_eq!(safe_name("My List!", 1), "My List");
        assert_eq!(safe_name("  a/b\\c  ", 1), "abc");
        assert_eq!(safe_name("我喜欢的音乐", 1), "我喜欢的音乐");
        assert_eq!(safe_name("mix_2024-01", 1), "mix_2024-01");
        assert_eq!(safe_name("???", 42), "42");
        assert_eq!(safe_name("", 7), "7");
    }

    #[test]
    fn test_backup_data() {
        let data = sample();
        assert_eq!(data.song_count, 2);
        assert_eq!(data.description, "");
        assert!(data.is_private());
        assert_eq!(data.songs[0].order, 1);
        assert_eq!(data.songs[1].order, 2);
        assert_eq!(data.songs[1].artist, "A, B");
        assert_eq!(data.songs[0].url, "https://music.163.com/#/song?id=1");
    }

    #[test]
    fn test_json_keeps_unicode() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"name\": \"我喜欢的音乐\""));
        assert!(json.contains("\"cover_file\": \"abc.jpg\""));
        assert!(json.contains("\"updated_time\": null"));
        let back: BackupData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_text() {
        let text = sample().to_text();
        let expected = format!(
            "歌单名称: 我喜欢的音乐\n\
             歌单ID: 99\n\
             简介: \n\
             歌曲数量: 2\n\
             创建时间: 1000\n\
             更新时间: \n\
             隐私设置: 私密\n\
             封面: abc.jpg\n\
             \n{}\n\
             歌曲列表:\n\n\
             1. 晴天 - 周杰伦\n   专辑: 叶惠美\n   URL: https://music.163.com/#/song?id=1\n\n\
             2. Duet - A, B\n   专辑: Pair\n   URL: https://music.163.com/#/song?id=2\n\n",
            "=".repeat(50)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_public_no_cover() {
        let mut data = sample();
        data.privacy = 0;
        data.cover_file = None;
        let text = data.to_text();
        assert!(text.contains("隐私设置: 公开\n"));
        assert!(text.contains("封面: 未下载\n"));
    }

    #[test]
    fn test_render_propagates_error() {
        struct Full(usize);
        impl Write for Full {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                if self.0 < s.len() {
                    return Err(fmt::Error);
                }
                self.0 -= s.len();
                Ok(())
            }
        }

        let data = sample();
        assert!(data.render(&mut Full(16)).is_err());
        let len = data.to_text().len();
        assert!(data.render(&mut Full(len)).is_ok());
        assert!(data.render(&mut Full(len - 1)).is_err());
    }

    #[test]
    fn test_summary() {
        let results = vec![sample()];
        let s = Summary::new(5, &results, "2024-01-01T00:00:00+08:00".to_string());
        assert_eq!(s.total_playlists, 1);
        assert_eq!(
            s.playlists[0],
            SummaryEntry {
                name: "我喜欢的音乐".to_string(),
                id: 99,
                song_count: 2,
                privacy: 10,
            }
        );
    }
}
