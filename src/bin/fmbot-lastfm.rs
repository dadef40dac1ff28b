use clap::{Parser, Subcommand};
use fmbot_lastfm::{
    format, AlbumImage, CallTimePeriod, LastFmConfig, LastFmService, TimeModel,
    TimeModelDefaults, DEFAULT_COUNT,
};

/// Query Last.fm the way the .fmbot commands do
#[derive(Parser)]
#[command(
    name = "fmbot-lastfm",
    about = "Query Last.fm the way the .fmbot commands do",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a user's most recent scrobbles
    ///
    /// Usage examples:
    /// # Now playing and the previous track
    /// fmbot-lastfm recent rj
    ///
    /// # Last ten scrobbles, without links
    /// fmbot-lastfm recent rj --count 10 --plain
    Recent {
        username: String,

        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: u32,

        /// Print each track on one line without links
        #[arg(long)]
        plain: bool,
    },

    /// Show a user's profile
    User { username: String },

    /// Check whether a Last.fm account exists
    Exists { username: String },

    /// Show details of a track
    Track {
        artist: String,
        track: String,

        /// Include this user's play count
        #[arg(long)]
        username: Option<String>,
    },

    /// Show details of an artist
    Artist {
        artist: String,

        #[arg(long)]
        username: Option<String>,
    },

    /// Show details of an album
    Album {
        artist: String,
        album: String,

        #[arg(long)]
        username: Option<String>,

        /// Download the cover and print its dimensions
        #[arg(long)]
        cover: bool,
    },

    /// Find the best matching track
    SearchTrack { query: String },

    /// Find the best matching album
    SearchAlbum { query: String },

    /// Show a user's top albums
    ///
    /// Usage examples:
    /// # Top albums of the last month
    /// fmbot-lastfm top-albums rj month
    ///
    /// # Top albums of all time
    /// fmbot-lastfm top-albums rj overall --count 10
    TopAlbums {
        username: String,

        /// Period options such as `week`, `m`, `yearly` or `alltime`
        options: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: u32,
    },

    /// Show a user's top artists
    TopArtists {
        username: String,

        options: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: u32,
    },

    /// Show a user's top tracks
    TopTracks {
        username: String,

        options: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match LastFmConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables:");
            eprintln!("  LASTFM_API_KEY=your_api_key");
            eprintln!("  LASTFM_API_SECRET=your_api_secret (optional)");
            std::process::exit(1);
        }
    };

    let service = LastFmService::from_config(
        Box::new(http_client::native::NativeClient::new()),
        config,
    );

    if let Err(e) = execute_command(args.command, &service).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    log::debug!("Last.fm calls made: {}", service.call_counter().get());
    Ok(())
}

fn time_model(options: &[String]) -> TimeModel {
    TimeModel::from_options(options, &TimeModelDefaults::default())
}

fn heading(title: &str, model: &TimeModel) {
    if model.description().is_empty() {
        println!("{title}");
    } else {
        println!("{title} ({})", model.description());
    }
}

async fn execute_command(
    command: Commands,
    service: &LastFmService,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Recent {
            username,
            count,
            plain,
        } => {
            let page = service.get_recent_scrobbles(&username, count).await?;
            if page.is_empty() {
                println!("No scrobbles for {username}");
            }
            for track in &page.items {
                let marker = if track.now_playing { "▶ " } else { "" };
                if plain {
                    println!("{marker}{}", format::track_to_one_lined_string(track));
                } else {
                    print!("{marker}{}", format::track_to_linked_string(track));
                }
            }
            println!("{} scrobbles in total", page.total_items);
        }

        Commands::User { username } => {
            let user = service.get_user_info(&username).await?.into_result()?;
            println!("{} ({})", user.name, user.url);
            if let Some(real_name) = &user.real_name {
                println!("  Name: {real_name}");
            }
            if let Some(country) = &user.country {
                println!("  Country: {country}");
            }
            println!("  Scrobbles: {}", user.playcount);
            if let Some(registered) = user.registered_at() {
                println!("  Registered: {}", registered.format("%Y-%m-%d"));
            }
        }

        Commands::Exists { username } => {
            if service.lastfm_user_exists(&username).await? {
                println!("✅ {username} exists");
            } else {
                println!("❌ {username} does not exist");
            }
        }

        Commands::Track {
            artist,
            track,
            username,
        } => match service
            .get_track_info(&track, &artist, username.as_deref())
            .await?
        {
            Some(info) => {
                println!("{} by {} ({})", info.name, info.artist.name, info.url);
                println!("  Listeners: {}", info.listeners);
                println!("  Plays: {}", info.playcount);
                if let Some(plays) = info.user_playcount {
                    println!("  Your plays: {plays}");
                }
                if !info.top_tags.tag.is_empty() {
                    println!("  Tags: {}", format::top_tags_to_string(&info.top_tags));
                }
            }
            None => println!("Track not found"),
        },

        Commands::Artist { artist, username } => {
            let info = service
                .get_artist_info(&artist, username.as_deref())
                .await?
                .into_result()?
                .artist;
            println!("{} ({})", info.name, info.url);
            println!("  Listeners: {}", info.stats.listeners);
            if let Some(plays) = info.stats.user_playcount {
                println!("  Your plays: {plays}");
            }
            if !info.tags.tag.is_empty() {
                println!("  Tags: {}", format::tags_to_linked_string(&info.tags));
            }
        }

        Commands::Album {
            artist,
            album,
            username,
            cover,
        } => {
            let info = service
                .get_album_info(&artist, &album, username.as_deref())
                .await?
                .into_result()?
                .album;
            println!("{} by {} ({})", info.name, info.artist, info.url);
            println!("  Plays: {}", info.playcount);
            if let Some(plays) = info.user_playcount {
                println!("  Your plays: {plays}");
            }
            for track in &info.tracks.track {
                println!("  {}", format::track_to_one_lined_string(track));
            }

            if cover {
                let url = service
                    .get_album_images(&artist, &album)
                    .await?
                    .and_then(|images| images.largest().map(str::to_string));
                match service.get_album_image(url.as_deref().unwrap_or_default()).await {
                    AlbumImage::Loaded(image) => {
                        println!("  Cover: {}x{}", image.width(), image.height())
                    }
                    AlbumImage::Missing => println!("  Cover: none"),
                    AlbumImage::Failed(e) => println!("  Cover: failed ({e})"),
                }
            }
        }

        Commands::SearchTrack { query } => match service.search_track(&query).await?.first() {
            Some(track) => print!("{}", format::track_to_linked_string(track)),
            None => println!("No track found for '{query}'"),
        },

        Commands::SearchAlbum { query } => match service.search_album(&query).await?.first() {
            Some(album) => println!("{album} ({})", album.url),
            None => println!("No album found for '{query}'"),
        },

        Commands::TopAlbums {
            username,
            options,
            count,
        } => {
            let model = time_model(&options);
            let page = service
                .get_top_albums(&username, model.stats_time_span(), count)
                .await?;
            heading(&format!("Top albums for {username}"), &model);
            for (i, album) in page.items.iter().enumerate() {
                println!(
                    "{}. {album} - {} plays",
                    i + 1,
                    album.playcount.unwrap_or_default()
                );
            }
        }

        Commands::TopArtists {
            username,
            options,
            count,
        } => {
            let model = time_model(&options);
            let page = service
                .get_top_artists(&username, model.stats_time_span(), count)
                .await?;
            heading(&format!("Top artists for {username}"), &model);
            for (i, artist) in page.items.iter().enumerate() {
                println!(
                    "{}. {artist} - {} plays",
                    i + 1,
                    artist.playcount.unwrap_or_default()
                );
            }
        }

        Commands::TopTracks {
            username,
            options,
            count,
        } => {
            let model = time_model(&options);
            let period = CallTimePeriod::from(model.chart_time_period());
            let top = service
                .get_top_tracks(&username, period, count)
                .await?
                .into_result()?
                .top_tracks;
            heading(&format!("Top tracks for {username}"), &model);
            for (i, track) in top.track.iter().enumerate() {
                println!(
                    "{}. {} - {} plays",
                    i + 1,
                    format::track_to_one_lined_string(track),
                    track.playcount.unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
