//! Command-line arguments and environment fallbacks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage a music catalog of musicians, albums, songs and genres",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(
        long,
        env = "MUSICLIB_DB",
        default_value = "musiclib.sqlite3",
        value_name = "PATH",
        help = "SQLite catalog database; created and migrated on first use"
    )]
    pub db: PathBuf,

    #[arg(
        long,
        env = "MUSICLIB_LOG_LEVEL",
        value_name = "LEVEL",
        help = "trace|debug|info|warn|error; defaults by build mode"
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "MUSICLIB_LOG_DIR",
        value_name = "DIR",
        help = "Absolute directory for rolling log files; logging is off when unset"
    )]
    pub log_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "MUSICLIB_LOCALE",
        default_value = "en",
        value_name = "LOCALE",
        help = "Locale used to resolve notices"
    )]
    pub locale: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Check that the core library is linked")]
    Ping,
    #[command(about = "Print the core library version")]
    Version,
    #[command(about = "Musician records")]
    Musician {
        #[command(subcommand)]
        cmd: MusicianCmd,
    },
    #[command(about = "Genre records")]
    Genre {
        #[command(subcommand)]
        cmd: GenreCmd,
    },
    #[command(about = "Album records")]
    Album {
        #[command(subcommand)]
        cmd: AlbumCmd,
    },
    #[command(about = "Song records")]
    Song {
        #[command(subcommand)]
        cmd: SongCmd,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum MusicianCmd {
    Add {
        name: String,
        #[arg(long)]
        biography: Option<String>,
    },
    List {
        #[arg(long, help = "Case-insensitive substring of the name")]
        name: Option<String>,
    },
    Show {
        id: i64,
    },
    #[command(about = "Change a musician; omitted options keep their stored value")]
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        biography: Option<String>,
        #[arg(long, conflicts_with = "biography")]
        clear_biography: bool,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum GenreCmd {
    Add {
        name: String,
    },
    List {
        #[arg(long, help = "Case-insensitive substring of the name")]
        name: Option<String>,
    },
    #[command(about = "Rename a genre")]
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumCmd {
    Add {
        title: String,
        #[arg(long, value_name = "DD-MM-YYYY")]
        released: String,
        #[arg(long, value_name = "ID")]
        musician: i64,
    },
    List {
        #[arg(long, value_name = "ID", conflicts_with = "title")]
        musician: Option<i64>,
        #[arg(long, help = "Case-insensitive substring of the title")]
        title: Option<String>,
    },
    Show {
        id: i64,
    },
    #[command(about = "Change an album; omitted options keep their stored value")]
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_name = "DD-MM-YYYY")]
        released: Option<String>,
        #[arg(long, value_name = "ID")]
        musician: Option<i64>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SongCmd {
    Add {
        title: String,
        #[arg(long, value_name = "SECONDS")]
        duration: u32,
        #[arg(long, value_name = "ID")]
        musician: i64,
        #[arg(long, value_name = "ID")]
        album: Option<i64>,
        #[arg(long, value_name = "ID")]
        genre: Option<i64>,
    },
    List {
        #[arg(long, value_name = "ID", group = "filter")]
        musician: Option<i64>,
        #[arg(long, value_name = "ID", group = "filter")]
        album: Option<i64>,
        #[arg(long, value_name = "ID", group = "filter")]
        genre: Option<i64>,
    },
    #[command(about = "Find songs whose title contains PATTERN, ignoring case")]
    Search {
        pattern: String,
    },
    Show {
        id: i64,
    },
    #[command(about = "Change a song; omitted options keep their stored value")]
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_name = "SECONDS")]
        duration: Option<u32>,
        #[arg(long, value_name = "ID")]
        musician: Option<i64>,
        #[arg(long, value_name = "ID", conflicts_with = "clear_album")]
        album: Option<i64>,
        #[arg(long, value_name = "ID", conflicts_with = "clear_genre")]
        genre: Option<i64>,
        #[arg(long)]
        clear_album: bool,
        #[arg(long)]
        clear_genre: bool,
    },
    Delete {
        id: i64,
    },
}
