//! Frame pacing shared by the game loop

use std::time::{Duration, Instant};

/// Duration of one frame at `target_fps` (at least 1 fps)
pub fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_secs(1) / target_fps.clamp(1, 1000) as u32
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// This function should be called at the end of each game loop iteration.
/// It sleeps for the remaining time if the frame finished early.
///
/// # Arguments
/// * `frame_start` - The `Instant` when the frame began (typically from `Instant::now()`)
/// * `frame_duration` - Time budget of one frame
pub fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}
