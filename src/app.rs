use tokio::task::JoinHandle;

use crate::config::Config;
use crate::conversation::Conversation;
use crate::support::{SupportClient, CONNECT_FALLBACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,

    // Chat input state
    pub input: String,
    pub input_cursor: usize, // cursor position in input, in chars

    // Conversation state
    pub conversation: Conversation,
    pub exchange_task: Option<JoinHandle<String>>,

    // Chat viewport (dimensions updated during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub chat_total_lines: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    pub client: SupportClient,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();
        Self::with_client(SupportClient::new(config.endpoint()))
    }

    pub fn with_client(client: SupportClient) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Home,
            input_mode: InputMode::Normal,

            input: String::new(),
            input_cursor: 0,

            conversation: Conversation::new(),
            exchange_task: None,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            chat_total_lines: 0,

            animation_frame: 0,

            client,
        }
    }

    /// Enter the chat screen with the input focused.
    pub fn open_chat(&mut self) {
        self.screen = Screen::Chat;
        self.input_mode = InputMode::Editing;
        self.input_cursor = self.input.chars().count();
    }

    /// Accept the current input as a user message and start the exchange.
    /// Blank input, or an exchange already in flight, leaves everything
    /// untouched (the input text included).
    pub fn submit_input(&mut self) {
        if self.exchange_task.is_some() {
            return;
        }

        let text = self.input.trim().to_string();
        if !self.conversation.append_user_message(&text) {
            return;
        }

        self.input.clear();
        self.input_cursor = 0;
        self.scroll_chat_to_bottom();

        let client = self.client.clone();
        self.exchange_task = Some(tokio::spawn(async move { client.exchange(&text).await }));
    }

    /// Fold a finished exchange into the conversation, if there is one.
    /// A task that died maps to the connect fallback so the busy gate
    /// still reopens.
    pub async fn poll_exchange(&mut self) {
        let finished = self
            .exchange_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.exchange_task.take() {
            let reply = task
                .await
                .unwrap_or_else(|_| CONNECT_FALLBACK.to_string());
            self.conversation.complete_exchange(reply);
            self.scroll_chat_to_bottom();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.conversation.is_busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Chat scrolling. Manual scroll clamps against the line count from the
    // last render; scroll-to-bottom estimates wrapped heights itself so it
    // also works between renders.
    pub fn scroll_chat_down(&mut self, n: u16) {
        let max = self.chat_total_lines.saturating_sub(self.chat_height);
        self.chat_scroll = self.chat_scroll.saturating_add(n).min(max);
    }

    pub fn scroll_chat_up(&mut self, n: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(n);
    }

    /// Scroll so the newest message (or the Thinking indicator) is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.conversation.messages() {
            total_lines += 1; // Sender line ("You:" or "Assistant:")
            for line in msg.text.lines() {
                // Character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.conversation.is_busy() {
            total_lines += 2; // "Assistant:" + "Thinking..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        } else {
            self.chat_scroll = 0;
        }
    }
}
