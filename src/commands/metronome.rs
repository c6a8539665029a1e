//! Metronome commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use etude_core::types::clamp_tempo;

/// Handle `metronome start`
pub fn cmd_metronome_start(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !ctx.metronome.is_enabled() {
        return CommandResult::Error(
            "Metronome is disabled - 'metronome on' first".to_string(),
        );
    }
    ctx.metronome.start();
    CommandResult::Message(
        format!(
            "🎵 Metronome running at {} BPM ({} ms per beat)",
            ctx.metronome.tempo(),
            ctx.metronome.tick_interval_ms()
        )
        .bright_green()
        .to_string(),
    )
}

/// Handle `metronome stop`
pub fn cmd_metronome_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.metronome.stop();
    CommandResult::Message("🔇 Metronome stopped.".bright_green().to_string())
}

/// Handle `metronome tempo <bpm>`
pub fn cmd_metronome_tempo(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Ok(bpm) = args.trim().parse::<u32>() else {
        return CommandResult::Error(format!("Invalid tempo: {}", args));
    };

    let clamped = clamp_tempo(bpm);
    ctx.metronome.set_tempo(clamped);

    let mut msg = format!("Tempo set to {} BPM", clamped);
    if clamped != bpm {
        msg.push_str(&format!(" (clamped from {})", bpm));
    }
    if ctx.metronome.is_running() {
        msg.push_str(" - restarting the measure");
    }
    CommandResult::Message(msg.bright_green().to_string())
}

/// Handle `metronome on`
pub fn cmd_metronome_on(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.metronome.set_enabled(true);
    CommandResult::Message(
        "Metronome enabled - 'metronome start' to run it"
            .bright_green()
            .to_string(),
    )
}

/// Handle `metronome off` - disabling also stops a running metronome
pub fn cmd_metronome_off(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.metronome.set_enabled(false);
    CommandResult::Message("Metronome disabled.".bright_green().to_string())
}

/// Handle bare `metronome` - status line
pub fn cmd_metronome_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let state = if !ctx.metronome.is_enabled() {
        "disabled".red().to_string()
    } else if ctx.metronome.is_running() {
        "running".bright_green().to_string()
    } else {
        "stopped".yellow().to_string()
    };
    CommandResult::Message(format!(
        "Metronome: {} at {} BPM ({} ms per beat)",
        state,
        ctx.metronome.tempo(),
        ctx.metronome.tick_interval_ms()
    ))
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
    fn test_tempo_is_clamped_at_the_command_boundary() {
        let mut ctx = test_context();
        cmd_metronome_tempo("30", &mut ctx);
        assert_eq!(ctx.metronome.tempo(), 60);

        cmd_metronome_tempo("500", &mut ctx);
        assert_eq!(ctx.metronome.tempo(), 200);

        assert!(matches!(
            cmd_metronome_tempo("fast", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_start_refused_while_disabled() {
        let mut ctx = test_context();
        cmd_metronome_off("", &mut ctx);
        assert!(matches!(
            cmd_metronome_start("", &mut ctx),
            CommandResult::Error(_)
        ));
    }
}
