#![allow(dead_code)]
use async_trait::async_trait;
use fmbot_lastfm::{LastFmConfig, LastFmService};
use http_client::{Error, HttpClient, Request, Response};
use http_types::StatusCode;
use std::sync::{Arc, Mutex};

/// Canned HTTP transport that answers by matching a fragment of the request URL.
///
/// Routes are checked in the order they were added; requests no route matches
/// get a connection error.
#[derive(Debug, Clone, Default)]
pub struct RoutedHttpClient {
    routes: Vec<(String, u16, Vec<u8>)>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl RoutedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer Last.fm calls to `method` with a JSON body.
    pub fn method(self, method: &str, status: u16, body: &str) -> Self {
        self.route(&format!("method={method}&"), status, body.as_bytes().to_vec())
    }

    pub fn route(mut self, fragment: &str, status: u16, body: Vec<u8>) -> Self {
        self.routes.push((fragment.to_string(), status, body));
        self
    }

    /// Every URL requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for RoutedHttpClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let url = req.url().to_string();
        self.requests.lock().unwrap().push(url.clone());

        let route = self
            .routes
            .iter()
            .find(|(fragment, _, _)| url.contains(fragment.as_str()));
        match route {
            Some((_, status, body)) => {
                let mut response = Response::new(*status);
                response.set_body(body.clone());
                Ok(response)
            }
            None => Err(Error::from_str(
                StatusCode::ServiceUnavailable,
                format!("no route for {url}"),
            )),
        }
    }
}

/// A service over `http` with its own call counter.
pub fn service(http: &RoutedHttpClient) -> LastFmService {
    LastFmService::from_config(Box::new(http.clone()), LastFmConfig::new("test-api-key"))
        .with_call_counter(Arc::new(fmbot_lastfm::ApiCallCounter::new()))
}

pub const RECENT_TRACKS: &str = r##"{
    "recenttracks": {
        "track": [
            {
                "artist": {"mbid": "", "#text": "Wilco"},
                "streamable": "0",
                "image": [{"size": "extralarge", "#text": "https://lastfm.freetls.fastly.net/i/u/300x300/sky.png"}],
                "mbid": "",
                "album": {"mbid": "", "#text": "Sky Blue Sky"},
                "name": "Impossible Germany",
                "url": "https://www.last.fm/music/Wilco/_/Impossible+Germany",
                "@attr": {"nowplaying": "true"}
            },
            {
                "artist": {"mbid": "", "#text": "Radiohead"},
                "image": [],
                "mbid": "",
                "album": {"mbid": "", "#text": ""},
                "name": "Creep (Acoustic)",
                "url": "https://www.last.fm/music/Radiohead/_/Creep+(Acoustic)",
                "date": {"uts": "1700000000", "#text": "14 Nov 2023, 22:13"}
            }
        ],
        "@attr": {"user": "rj", "totalPages": "75158", "page": "1", "perPage": "2", "total": "150316"}
    }
}"##;

pub const USER_NOT_FOUND: &str = r#"{"message": "User not found", "error": 6, "links": []}"#;

pub const USER_INFO: &str = r##"{
    "user": {
        "name": "RJ",
        "realname": "Richard Jones ",
        "url": "https://www.last.fm/user/RJ",
        "country": "United Kingdom",
        "playcount": "150316",
        "subscriber": "1",
        "type": "alum",
        "registered": {"unixtime": "1037793040", "#text": 1037793040},
        "image": []
    }
}"##;

pub const TOP_TRACKS: &str = r#"{
    "toptracks": {
        "track": [
            {"name": "Jesus, Etc.", "playcount": "120", "url": "https://www.last.fm/music/Wilco/_/Jesus,+Etc.",
             "artist": {"name": "Wilco", "mbid": "", "url": "https://www.last.fm/music/Wilco"},
             "@attr": {"rank": "1"}},
            {"name": "Reckoner", "playcount": "98", "url": "https://www.last.fm/music/Radiohead/_/Reckoner",
             "artist": {"name": "Radiohead", "mbid": "", "url": "https://www.last.fm/music/Radiohead"},
             "@attr": {"rank": "2"}}
        ],
        "@attr": {"user": "rj", "totalPages": "500", "page": "1", "perPage": "2", "total": "1000"}
    }
}"#;

pub const ALBUM_INFO: &str = r##"{
    "album": {
        "name": "Sky Blue Sky",
        "artist": "Wilco",
        "url": "https://www.last.fm/music/Wilco/Sky+Blue+Sky",
        "image": [
            {"size": "small", "#text": "https://lastfm.freetls.fastly.net/i/u/34s/sky.png"},
            {"size": "extralarge", "#text": "https://lastfm.freetls.fastly.net/i/u/300x300/sky.png"},
            {"size": "mega", "#text": ""}
        ],
        "listeners": "300000",
        "playcount": "4000000",
        "tags": {"tag": [
            {"name": "alt-country", "url": "https://www.last.fm/tag/alt-country"},
            {"name": "indie", "url": "https://www.last.fm/tag/indie"}
        ]},
        "tracks": {"track": [
            {"name": "Either Way", "url": "https://www.last.fm/music/Wilco/_/Either+Way",
             "artist": {"name": "Wilco"}, "@attr": {"rank": 1}}
        ]}
    }
}"##;
