//! Process Synthesizer - 通过命令行调用外部合成运行时
//!
//! 每次合成启动一次运行时进程：
//!
//! ```text
//! tts --text=... --model_path=... --config_path=... [--vocoder_path=...]
//!     [--speaker_idx=...] [--style_wav=...] [--use_cuda true] --out_path=/tmp/tts-<uuid>.wav
//! ```
//!
//! 取值参数统一写成 `--flag=value`，以 `-` 开头的文本不会被当成选项。
//! 运行时的 `--use_cuda` 是 `type=bool`，任何非空值都为真，因此只在启用时传入。
//! 运行时只接受参考音频路径作为风格，GST token 字典直接拒绝。
//!
//! 运行时写出的 WAV 被解码成波形后立即删除。

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use super::ModelProfile;
use crate::application::ports::{SynthesisEngine, SynthesisError};
use crate::config::{EngineConfig, RuntimeConfig};
use crate::domain::{StyleReference, SynthesisRequest, Waveform};
use crate::infrastructure::adapters::audio::WavCodec;

/// stderr 最多保留的字符数
const MAX_STDERR_CHARS: usize = 2000;

/// Process Synthesizer 配置
#[derive(Debug, Clone)]
pub struct ProcessSynthesizerConfig {
    /// 运行时可执行文件
    pub program: String,
    /// 附加在每次调用前面的参数
    pub extra_args: Vec<String>,
    /// 临时输出目录
    pub work_dir: PathBuf,
}

impl From<&EngineConfig> for ProcessSynthesizerConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            program: config.program.clone(),
            extra_args: config.extra_args.clone(),
            work_dir: config
                .work_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        }
    }
}

/// 运行时输出文件，离开作用域时删除
struct OutputFile(PathBuf);

impl OutputFile {
    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for OutputFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.0.display(), error = %e, "Failed to remove runtime output");
            }
        }
    }
}

/// Process Synthesizer
pub struct ProcessSynthesizer {
    runtime: Arc<RuntimeConfig>,
    profile: ModelProfile,
    config: ProcessSynthesizerConfig,
    codec: WavCodec,
}

impl ProcessSynthesizer {
    /// 读取模型配置并准备工作目录，失败即启动失败
    pub fn load(
        runtime: Arc<RuntimeConfig>,
        config: ProcessSynthesizerConfig,
    ) -> Result<Self, SynthesisError> {
        let profile = ModelProfile::load(&runtime)?;
        std::fs::create_dir_all(&config.work_dir)?;

        tracing::info!(
            program = %config.program,
            model = ?profile.model,
            sample_rate = profile.sample_rate,
            multi_speaker = profile.is_multi_speaker(),
            use_gst = profile.use_gst,
            use_cuda = runtime.use_cuda,
            "ProcessSynthesizer initialized"
        );

        Ok(Self {
            runtime,
            profile,
            config,
            codec: WavCodec::new(),
        })
    }

    /// 组装运行时命令行参数
    fn build_args(&self, request: &SynthesisRequest, out_path: &Path) -> Vec<OsString> {
        let runtime = &self.runtime;
        let mut args: Vec<OsString> = self.config.extra_args.iter().map(OsString::from).collect();

        args.push(flag("text", &request.text));
        args.push(flag("model_path", &runtime.model_path));
        args.push(flag("config_path", &runtime.config_path));

        if let Some(path) = &runtime.vocoder_path {
            args.push(flag("vocoder_path", path));
        }
        if let Some(path) = &runtime.vocoder_config_path {
            args.push(flag("vocoder_config_path", path));
        }
        if let Some(path) = &runtime.speakers_file_path {
            args.push(flag("speakers_file_path", path));
        }
        if let Some(speaker) = &request.speaker_id {
            args.push(flag("speaker_idx", speaker));
        }
        if let Some(StyleReference::Wav(path)) = &request.style {
            args.push(flag("style_wav", path));
        }

        if runtime.use_cuda {
            args.push("--use_cuda".into());
            args.push("true".into());
        }
        args.push(flag("out_path", out_path));
        args
    }
}

/// `--name=value` 形式的单个参数
fn flag(name: &str, value: impl AsRef<OsStr>) -> OsString {
    let mut arg = OsString::from(format!("--{}=", name));
    arg.push(value);
    arg
}

impl SynthesisEngine for ProcessSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Waveform, SynthesisError> {
        if let Some(speaker) = &request.speaker_id {
            if !self.profile.speaker_ids.is_empty() && !self.profile.speaker_ids.contains(speaker) {
                return Err(SynthesisError::UnknownSpeaker(speaker.clone()));
            }
        }
        if let Some(StyleReference::Tokens(_)) = &request.style {
            return Err(SynthesisError::UnsupportedStyle(
                "style token weights are not supported by the synthesis runtime; pass a reference .wav path".to_string(),
            ));
        }

        let job_id = Uuid::new_v4();
        let output = OutputFile(self.config.work_dir.join(format!("tts-{}.wav", job_id)));
        let args = self.build_args(request, output.path());

        tracing::debug!(
            job_id = %job_id,
            program = %self.config.program,
            text_len = request.text.len(),
            "Spawning synthesis runtime"
        );

        let started = Instant::now();
        let result = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SynthesisError::Spawn(format!("{}: {}", self.config.program, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr = stderr.trim();
            let tail: String = if stderr.chars().count() > MAX_STDERR_CHARS {
                let skip = stderr.chars().count() - MAX_STDERR_CHARS;
                stderr.chars().skip(skip).collect()
            } else {
                stderr.to_string()
            };
            return Err(SynthesisError::RuntimeFailed {
                status: result.status.to_string(),
                stderr: tail,
            });
        }

        let bytes = std::fs::read(output.path()).map_err(|e| {
            SynthesisError::InvalidOutput(format!(
                "runtime produced no audio at {}: {}",
                output.path().display(),
                e
            ))
        })?;

        let waveform = self
            .codec
            .decode(&bytes)
            .map_err(|e| SynthesisError::InvalidOutput(e.to_string()))?;

        tracing::debug!(
            job_id = %job_id,
            samples = waveform.samples.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Synthesis runtime finished"
        );

        Ok(waveform)
    }

    fn sample_rate(&self) -> u32 {
        self.profile.sample_rate
    }

    fn supports_multi_speaker(&self) -> bool {
        self.profile.is_multi_speaker()
    }

    fn speaker_ids(&self) -> Vec<String> {
        if self.profile.is_multi_speaker() {
            self.profile.speaker_ids.clone()
        } else {
            Vec::new()
        }
    }

    fn supports_style_tokens(&self) -> bool {
        self.profile.use_gst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        dir: tempfile::TempDir,
        runtime: Arc<RuntimeConfig>,
    }

    fn fixture(config_json: &str, speakers_json: Option<&str>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model_file.pth");
        let config_path = dir.path().join("config.json");
        std::fs::write(&model_path, b"weights").unwrap();
        std::fs::write(&config_path, config_json).unwrap();

        let speakers_file_path = speakers_json.map(|content| {
            let path = dir.path().join("speakers.json");
            std::fs::write(&path, content).unwrap();
            path
        });

        let runtime = Arc::new(RuntimeConfig {
            model_name: None,
            vocoder_name: None,
            model_path,
            config_path,
            vocoder_path: None,
            vocoder_config_path: None,
            speakers_file_path,
            port: 5002,
            use_cuda: false,
            debug: false,
            show_details: false,
        });

        Fixture { dir, runtime }
    }

    fn engine(fixture: &Fixture, program: &str) -> ProcessSynthesizer {
        ProcessSynthesizer::load(
            fixture.runtime.clone(),
            ProcessSynthesizerConfig {
                program: program.to_string(),
                extra_args: Vec::new(),
                work_dir: fixture.dir.path().join("work"),
            },
        )
        .unwrap()
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_build_args_minimal() {
        let fixture = fixture(r#"{"audio": {"sample_rate": 22050}}"#, None);
        let engine = engine(&fixture, "tts");

        let args = strings(&engine.build_args(&SynthesisRequest::new("hello"), Path::new("/tmp/o.wav")));

        assert_eq!(args[0], "--text=hello");
        assert!(args.iter().any(|a| a.starts_with("--model_path=")));
        assert!(args.iter().any(|a| a.starts_with("--config_path=")));
        assert!(!args.iter().any(|a| a.starts_with("--speaker_idx")));
        assert!(!args.iter().any(|a| a.starts_with("--style_wav")));
        assert!(!args.iter().any(|a| a.starts_with("--use_cuda")));
        assert_eq!(args.last().unwrap(), "--out_path=/tmp/o.wav");
    }

    #[test]
    fn test_build_args_enables_cuda_only_when_requested() {
        let fixture = fixture("{}", None);
        let mut engine = engine(&fixture, "tts");
        let mut runtime = (*engine.runtime).clone();
        runtime.use_cuda = true;
        engine.runtime = Arc::new(runtime);

        let args = strings(&engine.build_args(&SynthesisRequest::new("hello"), Path::new("/tmp/o.wav")));

        let cuda = args.iter().position(|a| a == "--use_cuda").unwrap();
        assert_eq!(args[cuda + 1], "true");
    }

    #[test]
    fn test_build_args_keeps_leading_dash_values_attached() {
        let fixture = fixture("{}", Some(r#"{"-p225": 0}"#));
        let engine = engine(&fixture, "tts");

        let request = SynthesisRequest::new("-5 degrees outside").with_speaker("-p225");
        let args = strings(&engine.build_args(&request, Path::new("/tmp/o.wav")));

        assert_eq!(args[0], "--text=-5 degrees outside");
        assert!(args.contains(&"--speaker_idx=-p225".to_string()));
        assert!(!args.contains(&"-5 degrees outside".to_string()));
    }

    #[test]
    fn test_build_args_with_speaker_style_and_extra_args() {
        let fixture = fixture("{}", Some(r#"{"p225": 0}"#));
        let mut engine = engine(&fixture, "python3");
        engine.config.extra_args = vec!["-m".to_string(), "TTS.bin.synthesize".to_string()];

        let request = SynthesisRequest::new("hi")
            .with_speaker("p225")
            .with_style(StyleReference::Wav("/srv/styles/calm.wav".to_string()));
        let args = strings(&engine.build_args(&request, Path::new("/tmp/o.wav")));

        assert_eq!(&args[0..2], &["-m", "TTS.bin.synthesize"]);
        assert!(args.contains(&"--speaker_idx=p225".to_string()));
        assert!(args.contains(&"--style_wav=/srv/styles/calm.wav".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--speakers_file_path=")));
    }

    #[test]
    fn test_style_tokens_are_rejected_before_spawn() {
        let fixture = fixture(r#"{"use_gst": true}"#, None);
        let engine = engine(&fixture, "/definitely/not/a/program");

        let mut tokens = std::collections::BTreeMap::new();
        tokens.insert("0".to_string(), 0.3);
        let request = SynthesisRequest::new("hi").with_style(StyleReference::Tokens(tokens));

        let err = engine.synthesize(&request).unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedStyle(_)));
    }

    #[test]
    fn test_capabilities_come_from_profile() {
        let fixture = fixture(r#"{"use_gst": true, "audio": {"sample_rate": 16000}}"#, Some(r#"{"a": 0, "b": 1}"#));
        let engine = engine(&fixture, "tts");

        assert_eq!(engine.sample_rate(), 16000);
        assert!(engine.supports_style_tokens());
        assert!(engine.supports_multi_speaker());
        assert_eq!(engine.speaker_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_speaker_is_rejected_before_spawn() {
        let fixture = fixture("{}", Some(r#"{"p225": 0}"#));
        let engine = engine(&fixture, "/definitely/not/a/program");

        let err = engine
            .synthesize(&SynthesisRequest::new("hi").with_speaker("p999"))
            .unwrap_err();
        assert!(matches!(err, SynthesisError::UnknownSpeaker(_)));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let fixture = fixture("{}", None);
        let engine = engine(&fixture, "/definitely/not/a/program");

        let err = engine.synthesize(&SynthesisRequest::new("hi")).unwrap_err();
        assert!(matches!(err, SynthesisError::Spawn(_)));
    }

    #[test]
    fn test_invalid_config_fails_to_load() {
        let fixture = fixture("not json", None);
        let result = ProcessSynthesizer::load(
            fixture.runtime.clone(),
            ProcessSynthesizerConfig {
                program: "tts".to_string(),
                extra_args: Vec::new(),
                work_dir: fixture.dir.path().to_path_buf(),
            },
        );
        assert!(matches!(result, Err(SynthesisError::ModelLoad(_))));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn test_runtime_output_is_decoded_and_removed() {
        let fixture = fixture(r#"{"audio": {"sample_rate": 16000}}"#, None);
        let reference = fixture.dir.path().join("reference.wav");
        let wav = WavCodec::new()
            .encode_wav(&Waveform::new(vec![0.25; 1600], 16000))
            .unwrap();
        std::fs::write(&reference, wav).unwrap();

        let script = write_script(
            fixture.dir.path(),
            "fake-tts",
            &format!(
                "for arg in \"$@\"; do\n  case \"$arg\" in\n    --out_path=*) cp \"{}\" \"${{arg#--out_path=}}\" ;;\n  esac\ndone",
                reference.display()
            ),
        );
        let engine = engine(&fixture, &script);

        let waveform = engine.synthesize(&SynthesisRequest::new("hello")).unwrap();
        assert_eq!(waveform.sample_rate, 16000);
        assert_eq!(waveform.samples.len(), 1600);

        let leftovers = std::fs::read_dir(fixture.dir.path().join("work")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_runtime_receives_leading_dash_text_and_no_cuda_flag() {
        let fixture = fixture("{}", None);
        let reference = fixture.dir.path().join("reference.wav");
        let wav = WavCodec::new()
            .encode_wav(&Waveform::new(vec![0.1; 160], 22050))
            .unwrap();
        std::fs::write(&reference, wav).unwrap();

        let script = write_script(
            fixture.dir.path(),
            "strict-tts",
            &format!(
                "text=\"\"\nout=\"\"\nfor arg in \"$@\"; do\n  case \"$arg\" in\n    --use_cuda*) echo \"unexpected $arg\" >&2; exit 7 ;;\n    --text=*) text=\"${{arg#--text=}}\" ;;\n    --out_path=*) out=\"${{arg#--out_path=}}\" ;;\n  esac\ndone\n[ \"$text\" = \"-hello there\" ] || {{ echo \"bad text '$text'\" >&2; exit 2; }}\ncp \"{}\" \"$out\"",
                reference.display()
            ),
        );
        let engine = engine(&fixture, &script);

        let waveform = engine.synthesize(&SynthesisRequest::new("-hello there")).unwrap();
        assert_eq!(waveform.samples.len(), 160);
    }

    #[cfg(unix)]
    #[test]
    fn test_runtime_failure_reports_stderr() {
        let fixture = fixture("{}", None);
        let script = write_script(fixture.dir.path(), "broken-tts", "echo 'model exploded' >&2\nexit 3");
        let engine = engine(&fixture, &script);

        let err = engine.synthesize(&SynthesisRequest::new("hello")).unwrap_err();
        match err {
            SynthesisError::RuntimeFailed { stderr, .. } => assert_eq!(stderr, "model exploded"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_runtime_without_output_is_invalid() {
        let fixture = fixture("{}", None);
        let script = write_script(fixture.dir.path(), "silent-tts", "exit 0");
        let engine = engine(&fixture, &script);

        let err = engine.synthesize(&SynthesisRequest::new("hello")).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidOutput(_)));
    }
}
