//! General commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use etude_core::types::library;

/// Handle `songs` - list the built-in song library
pub fn cmd_songs(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let mut lines = vec!["Song library:".bright_cyan().to_string()];
    for song in library() {
        lines.push(format!(
            "  {} - {} ({}, {} notes)",
            song.id.bright_yellow(),
            song.name,
            song.difficulty,
            song.len()
        ));
    }
    CommandResult::Message(lines.join("\n"))
}

/// Handle `help`
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let help = r#"Commands:
  play <note> [voice] [duration]   Sound a key (voices: piano, organ, synth)
  volume <0-100>                   Set master output volume

  metronome start | stop           Start/stop the click
  metronome tempo <bpm>            Set tempo (clamped to 60-200)
  metronome on | off               Enable/disable; off forces a stop
  metronome                        Show metronome status

  practice mode <free|guided|feedback>
  practice song <id>               Select a song (resets stats)
  practice press <note>            Press a key in the current mode
  practice stats | reset           Show/clear feedback stats
  practice                         Show practice status

  learn start [song-id]            Play a song's notes as falling prompts
  learn press <note>               Hit the expected note (+10 points)
  learn score | stop

  songs                            List the song library
  help                             This text
  exit | quit"#;
    CommandResult::Message(help.to_string())
}

/// Handle `exit` / `quit`
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}
