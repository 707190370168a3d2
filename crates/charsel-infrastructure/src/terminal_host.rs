//! A [`HostApi`] that runs the mini-app flow in a terminal.
//!
//! Dialogs and popups are printed to the output and answered on the input,
//! chrome buttons are rendered as one status line each, the native channel
//! prints the payload, and storage is a [`JsonFileStore`].

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use charsel_core::error::{CharselError, Result};
use charsel_core::identity::Identity;
use charsel_core::platform::{
    ButtonAppearance, ButtonKind, HapticKind, HostApi, POPUP_CANCEL_ID, PopupParams, ThemeParams,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::file_store::JsonFileStore;

type Input = Box<dyn AsyncBufRead + Unpin + Send>;
type Output = Box<dyn Write + Send>;

pub struct TerminalHost {
    identity: Option<Identity>,
    theme: Option<ThemeParams>,
    store: Option<JsonFileStore>,
    input: tokio::sync::Mutex<Input>,
    output: Mutex<Output>,
    sent: Mutex<Vec<String>>,
}

impl TerminalHost {
    pub fn new(input: Input, output: Output) -> Self {
        Self {
            identity: None,
            theme: None,
            store: None,
            input: tokio::sync::Mutex::new(input),
            output: Mutex::new(output),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Host reading from stdin and writing to stdout.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(BufReader::new(tokio::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_theme(mut self, theme: ThemeParams) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_store(mut self, store: JsonFileStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Payloads sent through the native channel so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn out(&self) -> MutexGuard<'_, Output> {
        self.output.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn print(&self, text: &str) -> Result<()> {
        let mut out = self.out();
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }

    /// Prints `prompt` and reads one trimmed line. EOF means nobody can answer.
    async fn ask(&self, prompt: &str) -> Result<String> {
        {
            let mut out = self.out();
            write!(out, "{}", prompt)?;
            out.flush()?;
        }
        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Err(CharselError::unavailable("terminal input"));
        }
        Ok(line.trim().to_string())
    }

    fn store(&self) -> Result<&JsonFileStore> {
        self.store
            .as_ref()
            .ok_or_else(|| CharselError::unavailable("cloud storage"))
    }
}

fn button_label(button: &charsel_core::platform::PopupButton) -> String {
    match (&button.text, button.kind) {
        (Some(text), _) => text.clone(),
        (None, Some(kind)) => kind.to_string(),
        (None, None) => button.id.clone(),
    }
}

#[async_trait]
impl HostApi for TerminalHost {
    fn signal_ready(&self) -> Result<()> {
        tracing::debug!("[TerminalHost] Ready");
        Ok(())
    }

    fn theme_params(&self) -> Result<Option<ThemeParams>> {
        Ok(self.theme.clone())
    }

    fn init_user(&self) -> Result<Option<Identity>> {
        Ok(self.identity.clone())
    }

    fn haptic(&self, kind: HapticKind) -> Result<()> {
        tracing::trace!("[TerminalHost] Haptic: {}", kind);
        Ok(())
    }

    async fn show_alert(&self, message: &str) -> Result<()> {
        self.print(&format!("! {}", message))
    }

    async fn show_confirm(&self, message: &str) -> Result<bool> {
        let answer = self.ask(&format!("? {} [y/N] ", message)).await?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    async fn show_popup(&self, params: &PopupParams) -> Result<String> {
        if let Some(title) = &params.title {
            self.print(&format!("== {} ==", title))?;
        }
        self.print(&params.message)?;
        if params.buttons.is_empty() {
            self.ask("[enter] ").await?;
            return Ok(POPUP_CANCEL_ID.to_string());
        }
        for (i, button) in params.buttons.iter().enumerate() {
            self.print(&format!("  {}) {}", i + 1, button_label(button)))?;
        }

        let answer = self.ask("> ").await?;
        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| params.buttons.get(i))
            .or_else(|| params.buttons.iter().find(|b| b.id == answer));
        Ok(chosen
            .map(|b| b.id.clone())
            .unwrap_or_else(|| POPUP_CANCEL_ID.to_string()))
    }

    fn send_data(&self, data: &str) -> Result<()> {
        self.print(&format!("→ sendData {}", data))?;
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(data.to_string());
        Ok(())
    }

    fn render_button(&self, kind: ButtonKind, appearance: &ButtonAppearance) -> Result<()> {
        if !appearance.visible {
            tracing::debug!("[TerminalHost] {} button hidden", kind);
            return Ok(());
        }
        let label = appearance.text.as_deref().unwrap_or("");
        let mut line = format!("[{}] {}", kind, label);
        if appearance.loading {
            line.push_str(" (…)");
        } else if !appearance.enabled {
            line.push_str(" (disabled)");
        }
        self.print(line.trim_end())
    }

    async fn storage_get(&self, key: &str) -> Result<Option<String>> {
        self.store()?.get(key).await
    }

    async fn storage_set(&self, key: &str, value: &str) -> Result<bool> {
        self.store()?.set(key, value).await?;
        Ok(true)
    }

    fn close(&self) -> Result<()> {
        self.print("Bye!")
    }
}
