use voxbatch::application::ports::AudioDecoder;
use voxbatch::domain::ENGINE_SAMPLE_RATE;
use voxbatch::infrastructure::audio::SymphoniaAudioDecoder;

fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let byte_rate = sample_rate * 2 * channels as u32;
    let block_align = 2 * channels;
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

#[test]
fn given_wav_at_engine_rate_when_decoding_then_returns_same_length_waveform() {
    let wav = build_wav(16_000, 1, &vec![0i16; 1600]);
    let decoder = SymphoniaAudioDecoder;

    let waveform = decoder.decode(&wav).unwrap();

    assert_eq!(waveform.sample_rate, ENGINE_SAMPLE_RATE);
    assert_eq!(waveform.samples.len(), 1600);
}

#[test]
fn given_wav_at_44100hz_when_decoding_then_resamples_preserving_duration() {
    // 4410 samples @ 44.1kHz is 0.1s, which is 1600 samples @ 16kHz.
    let wav = build_wav(44_100, 1, &vec![0i16; 4410]);
    let decoder = SymphoniaAudioDecoder;

    let waveform = decoder.decode(&wav).unwrap();

    assert_eq!(waveform.sample_rate, ENGINE_SAMPLE_RATE);
    assert_eq!(waveform.samples.len(), 1600);
}

#[test]
fn given_stereo_wav_when_decoding_then_downmixes_to_mono() {
    // 3200 interleaved samples over 2 channels is 1600 frames.
    let wav = build_wav(16_000, 2, &vec![0i16; 3200]);
    let decoder = SymphoniaAudioDecoder;

    let waveform = decoder.decode(&wav).unwrap();

    assert_eq!(waveform.samples.len(), 1600);
}

#[test]
fn given_corrupted_bytes_when_decoding_then_returns_error() {
    let garbage = vec![0xFFu8; 128];
    let decoder = SymphoniaAudioDecoder;

    assert!(decoder.decode(&garbage).is_err());
}

#[test]
fn given_empty_bytes_when_decoding_then_returns_error() {
    let decoder = SymphoniaAudioDecoder;

    assert!(decoder.decode(&[]).is_err());
}
