//! Emitter Configuration - 이벤트 이미터 설정
//!
//! JSON 또는 TOML 파일에서 로드하며, 누락된 필드는 기본값을 사용합니다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 설정 파일명
pub const EMITTER_CONFIG_FILE: &str = "emitter.json";

/// 이벤트당 기본 리스너 경고 임계값
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// 이벤트 이미터 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// 이벤트당 리스너 수가 이 값을 넘으면 경고 로그 (0이면 비활성화)
    ///
    /// 등록 자체는 항상 성공합니다.
    pub max_listeners: usize,

    /// 디버그 모드 (모든 emit/호출을 trace 레벨로 로깅)
    pub debug_mode: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            debug_mode: false,
        }
    }
}

/// 파일 형식 (확장자로 판별)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(Error::Config(format!(
                "Unsupported config format for {}: {:?}",
                path.display(),
                other
            ))),
        }
    }
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 리스너 한도 없음 (경고 비활성화)
    pub fn unlimited() -> Self {
        Self {
            max_listeners: 0,
            ..Self::default()
        }
    }

    /// 리스너 경고 임계값 설정 (0이면 비활성화)
    pub fn with_max_listeners(mut self, max: usize) -> Self {
        self.max_listeners = max;
        self
    }

    /// 디버그 로깅 설정
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// 리스너 수가 한도를 넘었는지 확인
    pub fn exceeds_max_listeners(&self, count: usize) -> bool {
        self.max_listeners > 0 && count > self.max_listeners
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 파일에서 로드 (.json / .toml)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        match format {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e))),
            Format::Toml => toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e))),
        }
    }

    /// 파일에서 로드 (실패 시 기본값)
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Using default emitter config");
                Self::default()
            }
        }
    }

    /// 파일에 저장 (.json / .toml)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| Error::Config(format!("Failed to serialize: {}", e)))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::Config(format!("Failed to serialize: {}", e)))?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
