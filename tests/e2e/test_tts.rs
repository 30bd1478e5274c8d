use crate::e2e::helpers;

use helpers::{marked_sentences, FakeTranscoder, FakeTtsRepository, TestContext, UNDECODABLE};
use pretty_assertions::assert_eq;
use tts_cli::domain::tts::chunker;
use tts_cli::domain::tts::{
    AudioFormat, LanguageCode, NoProgress, PartialOutputWarning, SynthesisPath, TtsServiceApi,
    TtsServiceError,
};

#[tokio::test]
async fn it_should_take_the_single_shot_path_for_short_text() {
    let ctx = TestContext::new(false);
    let text = format!("{}.", "a".repeat(149));
    assert_eq!(text.chars().count(), 150);

    let outcome = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.path, SynthesisPath::SingleShot);
    assert_eq!(outcome.fragments, 1);
    assert_eq!(ctx.repo.texts(), vec![text.clone()]);
    assert_eq!(
        std::fs::read(&outcome.output_path).unwrap(),
        FakeTtsRepository::audio_for(&text)
    );
    assert!(outcome.warning.is_none());
    assert_eq!(ctx.leftovers(), vec!["output.mp3"]);
}

#[tokio::test]
async fn it_should_take_the_single_shot_path_at_the_threshold() {
    let ctx = TestContext::new(false);
    let text = format!("{}.", "a".repeat(199));
    assert_eq!(text.chars().count(), 200);

    let outcome = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.path, SynthesisPath::SingleShot);
    assert_eq!(ctx.repo.texts(), vec![text]);
}

#[tokio::test]
async fn it_should_chunk_one_character_past_the_threshold() {
    let ctx = TestContext::new(true);
    let text = format!("{}.", "a".repeat(200));
    assert_eq!(text.chars().count(), 201);

    let outcome = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.path, SynthesisPath::Chunked);
    assert_eq!(outcome.fragments, 1);
    assert_eq!(ctx.repo.texts(), vec![text]);
}

#[tokio::test]
async fn it_should_copy_a_single_chunk_without_transcoder() {
    let ctx = TestContext::new(false);
    let text = format!("{}. {}.", "a".repeat(119), "b".repeat(119));
    assert_eq!(text.chars().count(), 241);

    let outcome = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.path, SynthesisPath::Chunked);
    assert_eq!(outcome.fragments, 1);
    assert!(outcome.warning.is_none());
    assert!(!outcome.is_degraded());
    assert_eq!(
        std::fs::read(&outcome.output_path).unwrap(),
        FakeTtsRepository::audio_for(&text)
    );
    assert_eq!(ctx.leftovers(), vec!["output.mp3"]);
}

#[tokio::test]
async fn it_should_trim_text_before_synthesis() {
    let ctx = TestContext::new(false);

    ctx.service
        .convert(ctx.request("  \n Hallo Welt.  \n", AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(ctx.repo.texts(), vec!["Hallo Welt.".to_string()]);
}

#[tokio::test]
async fn it_should_pass_the_language_to_the_provider() {
    let ctx = TestContext::new(false);
    let mut request = ctx.request("Hello there.", AudioFormat::Mp3);
    request.language = LanguageCode::parse("en").unwrap();

    let outcome = ctx.service.convert(request, &NoProgress).await.unwrap();

    assert_eq!(outcome.language.as_str(), "en");
    assert_eq!(ctx.repo.calls()[0].1, "en");
}

#[tokio::test]
async fn it_should_convert_single_shot_output_to_other_formats() {
    let ctx = TestContext::new(true);

    let outcome = ctx
        .service
        .convert(ctx.request("Hallo Welt.", AudioFormat::Wav), &NoProgress)
        .await
        .unwrap();

    let transcoder = ctx.transcoder.as_ref().unwrap();
    assert_eq!(outcome.path, SynthesisPath::SingleShot);
    assert_eq!(transcoder.concat_calls().len(), 1);
    assert_eq!(transcoder.concat_calls()[0].len(), 1);
    assert_eq!(
        std::fs::read(ctx.output_path("output.wav")).unwrap(),
        FakeTranscoder::expected_output(
            AudioFormat::Wav,
            &[FakeTtsRepository::audio_for("Hallo Welt.")]
        )
    );
    assert!(outcome.duration_secs.is_some());
}

#[tokio::test]
async fn it_should_fail_without_transcoder_for_non_native_formats() {
    let ctx = TestContext::new(false);

    for format in [AudioFormat::Wav, AudioFormat::Ogg] {
        let result = ctx
            .service
            .convert(ctx.request("Hallo Welt.", format), &NoProgress)
            .await;

        assert!(
            matches!(result, Err(TtsServiceError::MissingDependency(_))),
            "{:?}",
            result
        );
    }

    assert!(ctx.repo.calls().is_empty(), "provider must not be called");
    assert!(ctx.leftovers().is_empty());
}

#[tokio::test]
async fn it_should_combine_chunks_in_fragment_order() {
    let ctx = TestContext::new(true);
    let text = marked_sentences(10, 60).join(" ");
    let expected_fragments = chunker::split(&text, 250);
    assert!(expected_fragments.len() >= 3);

    let outcome = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.path, SynthesisPath::Chunked);
    assert_eq!(outcome.fragments, expected_fragments.len());
    assert_eq!(ctx.repo.texts(), expected_fragments);

    let audio: Vec<Vec<u8>> = expected_fragments
        .iter()
        .map(|f| FakeTtsRepository::audio_for(f))
        .collect();
    let written = std::fs::read(&outcome.output_path).unwrap();
    assert_eq!(written, FakeTranscoder::expected_output(AudioFormat::Mp3, &audio));

    let written = String::from_utf8(written).unwrap();
    let positions: Vec<usize> = (0..10)
        .map(|i| written.find(&format!("Marker{:02}", i)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
}

#[tokio::test]
async fn it_should_remove_temporary_fragments_after_success() {
    let ctx = TestContext::new(true);
    let text = marked_sentences(6, 100).join(" ");

    ctx.service
        .convert(ctx.request(&text, AudioFormat::Ogg), &NoProgress)
        .await
        .unwrap();

    let probed = ctx.transcoder.as_ref().unwrap().probed();
    assert_eq!(probed.len(), 3);
    for path in &probed {
        assert!(!path.exists(), "{} should be gone", path.display());
    }
    assert!(!probed[0].parent().unwrap().exists());
    assert_eq!(ctx.leftovers(), vec!["output.ogg"]);
}

#[tokio::test]
async fn it_should_fall_back_to_the_first_fragment_without_transcoder() {
    let ctx = TestContext::new(false);
    let text = marked_sentences(4, 100).join(" ");
    assert!(text.chars().count() >= 400);
    let fragments = chunker::split(&text, 250);

    let outcome = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.path, SynthesisPath::Chunked);
    assert!(outcome.is_degraded());
    assert_eq!(
        outcome.warning,
        Some(PartialOutputWarning {
            fragments_total: fragments.len(),
            fragments_written: 1,
        })
    );
    assert_eq!(
        std::fs::read(&outcome.output_path).unwrap(),
        FakeTtsRepository::audio_for(&fragments[0])
    );
}

#[tokio::test]
async fn it_should_refuse_partial_output_in_strict_mode() {
    let ctx = TestContext::strict();
    let text = marked_sentences(4, 100).join(" ");

    let result = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await;

    assert!(matches!(result, Err(TtsServiceError::MissingDependency(_))));
    assert!(ctx.repo.calls().is_empty());
    assert!(ctx.leftovers().is_empty());
}

#[tokio::test]
async fn it_should_allow_single_shot_in_strict_mode_without_transcoder() {
    let ctx = TestContext::strict();

    let outcome = ctx
        .service
        .convert(ctx.request("Kurzer Text.", AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap();

    assert!(!outcome.is_degraded());
}

#[tokio::test]
async fn it_should_abort_on_provider_failure_without_output() {
    let ctx = TestContext::with_repo(FakeTtsRepository::failing_on(1), true);
    let text = marked_sentences(6, 100).join(" ");

    let err = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Mp3), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, TtsServiceError::Provider(_)));
    assert!(err.to_string().contains("fragment 2 of 3"), "{}", err);
    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(ctx.repo.calls().len(), 2, "no call after the failing one");
    assert!(ctx.transcoder.as_ref().unwrap().concat_calls().is_empty());
    assert!(ctx.leftovers().is_empty());
}

#[tokio::test]
async fn it_should_keep_an_existing_destination_on_failure() {
    let ctx = TestContext::with_repo(FakeTtsRepository::failing_on(0), false);
    let request = ctx.request("Hallo Welt.", AudioFormat::Mp3);
    std::fs::write(&request.output_path, b"previous run").unwrap();

    let result = ctx.service.convert(request, &NoProgress).await;

    assert!(result.is_err());
    assert_eq!(
        std::fs::read(ctx.output_path("output.mp3")).unwrap(),
        b"previous run"
    );
    assert_eq!(ctx.leftovers(), vec!["output.mp3"]);
}

#[tokio::test]
async fn it_should_report_undecodable_fragments() {
    let ctx = TestContext::new(true);
    let mut sentences = marked_sentences(6, 100);
    sentences[2] = format!("{} {}.", UNDECODABLE, "y".repeat(87));
    let text = sentences.join(" ");

    let err = ctx
        .service
        .convert(ctx.request(&text, AudioFormat::Wav), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, TtsServiceError::Decode(_)));
    assert!(err.to_string().contains("fragment 1"), "{}", err);

    let probed = ctx.transcoder.as_ref().unwrap().probed();
    assert!(!probed[0].parent().unwrap().exists(), "work dir must be removed");
    assert!(ctx.leftovers().is_empty());
}

#[tokio::test]
async fn it_should_reject_empty_text() {
    let ctx = TestContext::new(true);

    let result = ctx
        .service
        .convert(ctx.request("   \n\t", AudioFormat::Mp3), &NoProgress)
        .await;

    assert!(matches!(result, Err(TtsServiceError::Validation(_))));
    assert!(ctx.repo.calls().is_empty());
}

#[tokio::test]
async fn it_should_produce_equivalent_output_when_run_twice() {
    let ctx = TestContext::new(true);
    let text = marked_sentences(8, 90).join(" ");

    let mut first = ctx.request(&text, AudioFormat::Ogg);
    first.output_path = ctx.output_path("first.ogg");
    let mut second = ctx.request(&text, AudioFormat::Ogg);
    second.output_path = ctx.output_path("second.ogg");

    let first = ctx.service.convert(first, &NoProgress).await.unwrap();
    let second = ctx.service.convert(second, &NoProgress).await.unwrap();

    assert_eq!(first.fragments, second.fragments);
    assert_eq!(first.duration_secs, second.duration_secs);
    assert_eq!(
        std::fs::read(&first.output_path).unwrap(),
        std::fs::read(&second.output_path).unwrap()
    );
}
