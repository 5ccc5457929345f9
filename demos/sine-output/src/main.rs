//! Plays a two-second sine tone through the platform's default output unit.
//!
//! The render callback is a plain function; its state lives in a struct on
//! `main`'s stack that outlives the registration.

#![cfg_attr(not(any(target_os = "macos", target_os = "ios")), allow(dead_code))]

use std::ffi::c_void;
use std::f64::consts::TAU;

use unitkit::prelude::*;

const SAMPLE_RATE: f64 = 44100.0;
const FREQUENCY: f64 = 440.0;
const AMPLITUDE: f32 = 0.2;

/// Oscillator state shared with the render thread through the context pointer.
struct Sine {
    phase: f64,
    step: f64,
}

impl Sine {
    fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            step: TAU * frequency / sample_rate,
        }
    }
}

/// Fills every non-interleaved channel buffer with the same sine.
unsafe extern "C" fn render_sine(
    context: *mut c_void,
    _action_flags: *mut RenderActionFlags,
    _time_stamp: *const AudioTimeStamp,
    _bus_number: u32,
    number_frames: u32,
    data: *mut AudioBufferList,
) -> OsStatus {
    if context.is_null() || data.is_null() {
        return OsStatus::PARAM_ERR;
    }

    // SAFETY: `context` is the `Sine` registered in `main`, touched only by
    // this thread while output runs; `data` holds `number_buffers` buffers of
    // at least `number_frames` f32 samples each.
    unsafe {
        let sine = &mut *(context as *mut Sine);
        let buffers = (*data).buffers_mut();
        let start_phase = sine.phase;

        for buffer in buffers.iter_mut() {
            let samples =
                std::slice::from_raw_parts_mut(buffer.data as *mut f32, number_frames as usize);
            let mut phase = start_phase;
            for sample in samples.iter_mut() {
                *sample = AMPLITUDE * phase.sin() as f32;
                phase += sine.step;
            }
        }

        sine.phase = (start_phase + sine.step * number_frames as f64) % TAU;
    }
    OsStatus::NO_ERR
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;

    let mut sine = Sine::new(FREQUENCY, SAMPLE_RATE);

    let mut output = ComponentInstance::default_output()?;
    println!("Opened {}", output.description());

    {
        let unit = output.handle();
        unit.set_stream_format(&StreamFormat::linear_pcm_f32(SAMPLE_RATE, 2, false))?;

        // SAFETY: `sine` outlives `output`, which stops and disposes the unit
        // before `sine` is dropped.
        unsafe {
            unit.set_render_callback(RenderCallback::new(
                render_sine,
                &mut sine as *mut Sine as *mut c_void,
            ))?;
        }

        match unit.factory_presets() {
            Ok(presets) if presets.is_empty() => println!("No factory presets"),
            Ok(presets) => {
                for preset in presets {
                    println!("Preset {}", preset);
                }
            }
            Err(e) => println!("Factory presets unavailable: {}", e),
        }

        match unit.bypass() {
            Ok(bypass) => println!("Bypass: {}", bypass),
            Err(e) => println!("Bypass unavailable: {}", e),
        }
    }

    output.initialize()?;
    output.unit().start_output()?;
    println!("Playing {} Hz for 2 seconds", FREQUENCY);
    std::thread::sleep(Duration::from_secs(2));
    output.unit().stop_output()?;

    drop(output);
    log::debug!("Final phase {:.3}", sine.phase);
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
fn main() {
    println!(
        "The default output unit ({}) is only available on Apple platforms",
        ComponentDescription::default_output()
    );
}
