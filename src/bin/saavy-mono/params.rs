//! Editable parameter list
//!
//! Every knob the front-end exposes, in display order, with its range and
//! step. Detune spans ±100 cents, cutoff 20 Hz..20 kHz and Q 1..10;
//! envelope stages run 0..1 s.

use saavy_mono::{EnvelopeSpec, SynthState, VoiceSpec};

const DETUNE_RANGE: (f64, f64) = (-100.0, 100.0);
const CUTOFF_RANGE: (f64, f64) = (20.0, 20_000.0);
const Q_RANGE: (f64, f64) = (1.0, 10.0);
const STAGE_RANGE: (f64, f64) = (0.0, 1.0);

/// Cutoff step: one semitone as a frequency ratio.
const CUTOFF_STEP: f64 = 1.059_463_094_359_295_3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Waveform(Voice),
    Detune(Voice),
    Unison(Voice),
    FilterType(Voice),
    Cutoff(Voice),
    Resonance(Voice),
    FilterEnv(Voice, Stage),
    Voice2Enabled,
    Mix,
    AmpEnv(Stage),
}

const STAGES: [Stage; 4] = [Stage::Attack, Stage::Decay, Stage::Sustain, Stage::Release];

impl Param {
    /// All parameters in display order.
    pub fn all() -> Vec<Param> {
        let mut list = Vec::with_capacity(28);
        for voice in [Voice::One, Voice::Two] {
            if voice == Voice::Two {
                list.push(Param::Voice2Enabled);
                list.push(Param::Mix);
            }
            list.extend([
                Param::Waveform(voice),
                Param::Detune(voice),
                Param::Unison(voice),
                Param::FilterType(voice),
                Param::Cutoff(voice),
                Param::Resonance(voice),
            ]);
            list.extend(STAGES.map(|s| Param::FilterEnv(voice, s)));
        }
        list.extend(STAGES.map(Param::AmpEnv));
        list
    }

    /// Section heading shown in the list.
    pub fn group(&self) -> &'static str {
        match self {
            Param::Waveform(v)
            | Param::Detune(v)
            | Param::Unison(v)
            | Param::FilterType(v)
            | Param::Cutoff(v)
            | Param::Resonance(v)
            | Param::FilterEnv(v, _) => match v {
                Voice::One => "Voice 1",
                Voice::Two => "Voice 2",
            },
            Param::Voice2Enabled | Param::Mix => "Voice 2",
            Param::AmpEnv(_) => "Amp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Param::Waveform(_) => "Waveform",
            Param::Detune(_) => "Detune",
            Param::Unison(_) => "Unison",
            Param::FilterType(_) => "Filter",
            Param::Cutoff(_) => "Cutoff",
            Param::Resonance(_) => "Res (Q)",
            Param::FilterEnv(_, stage) => match stage {
                Stage::Attack => "Flt Attack",
                Stage::Decay => "Flt Decay",
                Stage::Sustain => "Flt Sustain",
                Stage::Release => "Flt Release",
            },
            Param::Voice2Enabled => "Enabled",
            Param::Mix => "Mix",
            Param::AmpEnv(stage) => match stage {
                Stage::Attack => "Attack",
                Stage::Decay => "Decay",
                Stage::Sustain => "Sustain",
                Stage::Release => "Release",
            },
        }
    }

    /// Current value, formatted for display.
    pub fn display(&self, state: &SynthState) -> String {
        match *self {
            Param::Waveform(v) => voice(state, v).oscillator.waveform.to_string(),
            Param::Detune(v) => format!("{:+.0} ¢", voice(state, v).oscillator.detune_cents),
            Param::Unison(v) => voice(state, v).oscillator.unison_count().to_string(),
            Param::FilterType(v) => voice(state, v).filter.filter_type.to_string(),
            Param::Cutoff(v) => format!("{:.0} Hz", voice(state, v).filter.cutoff),
            Param::Resonance(v) => format!("{:.1}", voice(state, v).filter.resonance),
            Param::FilterEnv(v, stage) => format_stage(&voice(state, v).filter_envelope, stage),
            Param::Voice2Enabled => (if state.voice2_enabled { "on" } else { "off" }).to_string(),
            Param::Mix => format!("{:.0} %", state.mix * 100.0),
            Param::AmpEnv(stage) => format_stage(&state.amp_envelope, stage),
        }
    }

    /// Nudge the value one step up (`up == true`) or down, staying in range.
    pub fn adjust(&self, state: &mut SynthState, up: bool) {
        let dir = if up { 1.0 } else { -1.0 };
        match *self {
            Param::Waveform(v) => {
                let osc = &mut voice_mut(state, v).oscillator;
                osc.waveform = if up { osc.waveform.next() } else { osc.waveform.prev() };
            }
            Param::Detune(v) => {
                let osc = &mut voice_mut(state, v).oscillator;
                osc.detune_cents = step(osc.detune_cents, 5.0 * dir, DETUNE_RANGE);
            }
            Param::Unison(v) => {
                let osc = &mut voice_mut(state, v).oscillator;
                let count = osc.unison_count();
                osc.unison = (if up { count + 1 } else { count.saturating_sub(1) }).clamp(1, 7);
            }
            Param::FilterType(v) => {
                let filter = &mut voice_mut(state, v).filter;
                filter.filter_type = if up {
                    filter.filter_type.next()
                } else {
                    filter.filter_type.prev()
                };
            }
            Param::Cutoff(v) => {
                let filter = &mut voice_mut(state, v).filter;
                let next = if up {
                    filter.cutoff * CUTOFF_STEP
                } else {
                    filter.cutoff / CUTOFF_STEP
                };
                filter.cutoff = next.clamp(CUTOFF_RANGE.0, CUTOFF_RANGE.1);
            }
            Param::Resonance(v) => {
                let filter = &mut voice_mut(state, v).filter;
                filter.resonance = step(filter.resonance, 0.5 * dir, Q_RANGE);
            }
            Param::FilterEnv(v, stage) => {
                adjust_stage(&mut voice_mut(state, v).filter_envelope, stage, dir);
            }
            Param::Voice2Enabled => state.voice2_enabled = !state.voice2_enabled,
            Param::Mix => state.mix = step(state.mix, 0.05 * dir, STAGE_RANGE),
            Param::AmpEnv(stage) => adjust_stage(&mut state.amp_envelope, stage, dir),
        }
    }
}

fn voice(state: &SynthState, v: Voice) -> &VoiceSpec {
    match v {
        Voice::One => &state.voice1,
        Voice::Two => &state.voice2,
    }
}

fn voice_mut(state: &mut SynthState, v: Voice) -> &mut VoiceSpec {
    match v {
        Voice::One => &mut state.voice1,
        Voice::Two => &mut state.voice2,
    }
}

fn step(value: f64, delta: f64, (min, max): (f64, f64)) -> f64 {
    // snap to the step grid
    let next = ((value + delta) / delta.abs()).round() * delta.abs();
    next.clamp(min, max)
}

fn stage_value(env: &mut EnvelopeSpec, stage: Stage) -> &mut f64 {
    match stage {
        Stage::Attack => &mut env.attack,
        Stage::Decay => &mut env.decay,
        Stage::Sustain => &mut env.sustain,
        Stage::Release => &mut env.release,
    }
}

fn adjust_stage(env: &mut EnvelopeSpec, stage: Stage, dir: f64) {
    let value = stage_value(env, stage);
    *value = step(*value, 0.01 * dir, STAGE_RANGE);
}

fn format_stage(env: &EnvelopeSpec, stage: Stage) -> String {
    match stage {
        Stage::Attack => format!("{:.2} s", env.attack),
        Stage::Decay => format!("{:.2} s", env.decay),
        Stage::Sustain => format!("{:.2}", env.sustain),
        Stage::Release => format!("{:.2} s", env.release),
    }
}
