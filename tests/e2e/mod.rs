// Integration tests for the conversion pipeline
//
// The synthesis provider and the ffmpeg transcoder are replaced by
// deterministic fakes (see helpers/fakes.rs), so these tests need neither
// network access nor external binaries.

mod helpers;
mod test_tts;
