//! Keyboard and output commands

use crate::audio::synth::DEFAULT_NOTE_DURATION;
use crate::commands::{CommandContext, CommandResult};
use colored::*;
use etude_core::types::{is_known_key, key_frequency, Voice};

/// Handle `play <note> [voice] [duration]` - sound one key
pub fn cmd_play(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut parts = args.split_whitespace();

    let Some(note) = parts.next() else {
        return CommandResult::Error("Usage: play <note> [voice] [duration]".to_string());
    };

    let voice = parts
        .next()
        .map(Voice::from_name)
        .unwrap_or(Voice::Piano);

    let duration = match parts.next() {
        Some(raw) => match raw.parse::<f32>() {
            Ok(secs) if secs > 0.0 => secs,
            _ => {
                return CommandResult::Error(format!("Invalid duration: {}", raw));
            }
        },
        None => DEFAULT_NOTE_DURATION,
    };

    ctx.synth.play_note_for(note, voice, duration);

    let mut msg = format!(
        "♪ {} ({}) at {:.2} Hz for {:.2}s",
        note,
        voice,
        key_frequency(note),
        duration
    );
    if !is_known_key(note) {
        msg.push_str(" - off the keyboard, using the fallback pitch");
    }
    CommandResult::Message(msg.bright_green().to_string())
}

/// Handle `volume <0-100>` - set the master output volume
pub fn cmd_volume(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message("Volume control: use 'volume <0-100>'".to_string());
    }

    match args.trim().parse::<u32>() {
        Ok(level) if level <= 100 => {
            ctx.synth.set_master_volume(level as f32 / 100.0);
            CommandResult::Message(
                format!("🔊 Master volume set to {}%", level)
                    .bright_green()
                    .to_string(),
            )
        }
        _ => CommandResult::Error(format!("Invalid volume: {} (expected 0-100)", args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Metronome, ToneSynthesizer};
    use crate::learn::SongPlayer;
    use std::sync::{Arc, Mutex};

    fn test_context() -> CommandContext {
        let (player, _events) = SongPlayer::new();
        CommandContext::new(
            ToneSynthesizer::disabled(),
            Metronome::new(120, None),
            player,
            Arc::new(Mutex::new(None)),
        )
    }

    #[test]
    fn test_play_requires_a_note() {
        let mut ctx = test_context();
        assert!(matches!(cmd_play("", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_play_accepts_note_voice_duration() {
        let mut ctx = test_context();
        assert!(matches!(
            cmd_play("C4 organ 1.5", &mut ctx),
            CommandResult::Message(_)
        ));
        // Unknown keys play the fallback pitch rather than erroring
        assert!(matches!(
            cmd_play("Z9", &mut ctx),
            CommandResult::Message(_)
        ));
    }

    #[test]
    fn test_play_rejects_bad_duration() {
        let mut ctx = test_context();
        assert!(matches!(
            cmd_play("C4 piano -2", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_volume_bounds() {
        let mut ctx = test_context();
        assert!(matches!(
            cmd_volume("50", &mut ctx),
            CommandResult::Message(_)
        ));
        assert!(matches!(
            cmd_volume("150", &mut ctx),
            CommandResult::Error(_)
        ));
        assert!(matches!(
            cmd_volume("loud", &mut ctx),
            CommandResult::Error(_)
        ));
    }
}
