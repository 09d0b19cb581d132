mod audio_decoder;

pub use audio_decoder::SymphoniaAudioDecoder;
