//! Audio cues via Web Audio
//!
//! Procedurally synthesized - no external asset files. Exactly two cues:
//! an engine loop that runs while the game is in the Playing phase (paused,
//! not restarted, otherwise) and a one-shot crash burst fired on the
//! transition into GameOver.

#[cfg(target_arch = "wasm32")]
mod imp {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use crate::settings::Settings;

    pub struct AudioDirector {
        ctx: Option<AudioContext>,
        engine: Option<Engine>,
        engine_running: bool,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
    }

    /// Live engine-loop nodes. Pausing sets the gain to zero; the
    /// oscillator keeps running so play picks up where it left off.
    struct Engine {
        _osc: OscillatorNode,
        gain: GainNode,
    }

    impl AudioDirector {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                engine: None,
                engine_running: false,
                master_volume: settings.master_volume,
                sfx_volume: settings.sfx_volume,
                music_volume: settings.music_volume,
                muted: false,
            }
        }

        /// Resume the audio context (required after a user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.apply_engine_gain();
        }

        fn effective_sfx(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        fn effective_music(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.music_volume
            }
        }

        /// Run or pause the engine loop. Idempotent per frame; the caller
        /// passes `phase == Playing` every tick.
        pub fn set_engine_running(&mut self, running: bool) {
            if running && self.engine.is_none() {
                self.engine = self.start_engine();
            }
            self.engine_running = running;
            self.apply_engine_gain();
        }

        fn start_engine(&self) -> Option<Engine> {
            let ctx = self.ctx.as_ref()?;
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(OscillatorType::Sawtooth);
            osc.frequency().set_value(55.0);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            gain.gain().set_value(0.0);
            osc.start().ok()?;

            Some(Engine { _osc: osc, gain })
        }

        fn apply_engine_gain(&self) {
            if let Some(engine) = &self.engine {
                let target = if self.engine_running {
                    self.effective_music() * 0.2
                } else {
                    0.0
                };
                engine.gain.gain().set_value(target);
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Crash - low crunch with a metallic clatter on top
        pub fn play_crash(&self) {
            let vol = self.effective_sfx();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.45).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.frequency().set_value_at_time(1800.0, t).ok();
                osc.frequency().set_value_at_time(900.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(1400.0, t + 0.06).ok();
                osc.frequency().set_value_at_time(600.0, t + 0.09).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.18).ok();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use crate::settings::Settings;

    /// Inert stand-in for non-browser builds (tests, headless runs)
    pub struct AudioDirector;

    impl AudioDirector {
        pub fn new(_settings: &Settings) -> Self {
            Self
        }

        pub fn resume(&self) {}

        pub fn set_muted(&mut self, _muted: bool) {}

        pub fn set_engine_running(&mut self, _running: bool) {}

        pub fn play_crash(&self) {}
    }
}

pub use imp::AudioDirector;
