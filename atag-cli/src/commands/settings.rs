//! `settings` subcommands: which metadata columns listings show

use super::App;
use crate::cli::SettingsCommand;
use crate::CliResult;
use atag_common::prefs::Settings;
use tracing::info;

pub fn run(app: &mut App, command: SettingsCommand) -> CliResult<()> {
    match command {
        SettingsCommand::Show => print_settings(&app.prefs.settings()),
        SettingsCommand::Set {
            show_title,
            show_authors,
            show_genre,
            instant_playback,
        } => {
            let mut settings = app.prefs.settings();
            if let Some(v) = show_title {
                settings.show_title = v;
            }
            if let Some(v) = show_authors {
                settings.show_authors = v;
            }
            if let Some(v) = show_genre {
                settings.show_genre = v;
            }
            if let Some(v) = instant_playback {
                settings.instant_playback = v;
            }
            app.prefs.settings = Some(settings.clone());
            app.save_prefs()?;
            info!(?settings, "Saved settings");
            print_settings(&settings);
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("show-title:   {}", settings.show_title);
    println!("show-authors: {}", settings.show_authors);
    println!("show-genre:   {}", settings.show_genre);
    println!("instant-playback: {}", settings.instant_playback);
}
