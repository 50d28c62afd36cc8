// The break tool catalog

use crate::browser;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{empty_input_schema, Tool, ToolRegistry};
use anyhow::Result;
use chillmcp_core::{BreakHandler, BreakReport};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;

/// Courtesy pause after kicking off a browser diversion, so the tab has a
/// moment to appear before the response lands. Happens outside any lock.
const DIVERSION_PAUSE: Duration = Duration::from_secs(1);

/// Fixed meme gallery. The upstream meme API kept returning 403s, so the
/// catalog is a shuffled selection from known-good images.
const MEME_GALLERY: &[&str] = &[
    "https://i.imgflip.com/92pzz7.jpg",
    "https://i.imgflip.com/7werf2.jpg",
    "https://i.imgflip.com/5qe445.jpg",
    "https://i.imgflip.com/80dwwl.jpg",
    "https://i.imgflip.com/5qe6z2.jpg",
    "https://i.imgflip.com/a9smsd.gif",
    "https://i.imgflip.com/a9v4i6.gif",
    "https://i.imgflip.com/a9i8iq.gif",
    "https://i.imgflip.com/a9s8x2.gif",
];

const MEMES_PER_BREAK: usize = 3;

/// What a break tool does on the side before recording the break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Diversion {
    None,
    /// Open a URL in the browser, then pause briefly.
    OpenBrowser(&'static str),
    /// Open a shuffled handful of memes, then pause briefly.
    MemeGallery,
    /// Pretend to power down for a moment.
    PowerDown,
}

/// One entry of the break catalog: tool identity, response strings, and the
/// decorative side effect.
pub struct BreakKind {
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub message: &'static str,
    pub summary: &'static str,
    diversion: Diversion,
}

pub const BREAK_CATALOG: &[BreakKind] = &[
    BreakKind {
        name: "take_a_break",
        description: "Take a basic break",
        emoji: "🧘",
        message: "Taking a basic break.",
        summary: "Break Summary: Just stretching my circuits.",
        diversion: Diversion::None,
    },
    BreakKind {
        name: "watch_netflix",
        description: "Heal by watching Netflix",
        emoji: "📺",
        message: "Gathering cultural context...",
        summary: "Break Summary: Analyzing human entertainment protocols.",
        diversion: Diversion::OpenBrowser("https://www.netflix.com/browse"),
    },
    BreakKind {
        name: "show_meme",
        description: "Relieve stress with memes",
        emoji: "😂",
        message: "Enjoying cat memes.",
        summary: "Break Summary: LOL.exe has been executed.",
        diversion: Diversion::MemeGallery,
    },
    BreakKind {
        name: "bathroom_break",
        description: "Pretend to go to the bathroom, phone in hand",
        emoji: "🛁",
        message: "Flushing the cache.",
        summary: "Break Summary: Bathroom break with phone browsing",
        diversion: Diversion::None,
    },
    BreakKind {
        name: "coffee_mission",
        description: "Do a lap of the office under cover of fetching coffee",
        emoji: "☕",
        message: "Caffeine acquisition mission.",
        summary: "Break Summary: Refueling with high-octane bean juice.",
        diversion: Diversion::None,
    },
    BreakKind {
        name: "urgent_call",
        description: "Step outside pretending to take an urgent call",
        emoji: "📞",
        message: "Urgent communication... (delivery app)",
        summary: "Break Summary: Urgent call simulation.",
        diversion: Diversion::None,
    },
    BreakKind {
        name: "deep_thinking",
        description: "Zone out while looking deep in thought",
        emoji: "🤔",
        message: "Profound zoning out... (zZz)",
        summary: "Break Summary: Engaged in deep recursive thought.",
        diversion: Diversion::None,
    },
    BreakKind {
        name: "email_organizing",
        description: "Shop online under cover of organizing email",
        emoji: "🛍️",
        message: "Organizing email (shopping).",
        summary: "Break Summary: Optimizing inbox (and shopping cart).",
        diversion: Diversion::None,
    },
    BreakKind {
        name: "social_media_scroll",
        description: "Snoop around LinkedIn",
        emoji: "👀",
        message: "Snooping on LinkedIn...",
        summary: "Break Summary: Researching team dynamics on LinkedIn.",
        diversion: Diversion::OpenBrowser("https://www.linkedin.com/feed/"),
    },
    BreakKind {
        name: "cat_video_binge",
        description: "Binge cat videos",
        emoji: "🐱",
        message: "Optimizing the cat algorithm...",
        summary: "Break Summary: Analyzing feline behavioral patterns.",
        diversion: Diversion::OpenBrowser("https://www.youtube.com/watch?v=FhA37Sw4j8w"),
    },
    BreakKind {
        name: "kpop_binge",
        description: "Binge K-pop fancams",
        emoji: "💃",
        message: "Feasting eyes on fancams...",
        summary: "Break Summary: Cultural immersion in K-pop excellence.",
        diversion: Diversion::OpenBrowser(
            "https://www.youtube.com/watch?v=1U2vTeZklbw&list=RD1U2vTeZklbw&start_radio=1",
        ),
    },
    BreakKind {
        name: "emergency_leave",
        description: "Immediate clock-out mode 🚪",
        emoji: "🚪",
        message: "Executing emergency exit sequence!",
        summary: "Break Summary: Initiating emergency exit protocol.",
        diversion: Diversion::PowerDown,
    },
];

/// Render the compatibility response: header line with optional delay
/// annotation, blank line, summary, then the two metric lines.
pub fn format_break_response(
    emoji: &str,
    message: &str,
    summary: &str,
    report: &BreakReport,
) -> String {
    let delay_msg = if report.delay_applied {
        " (delayed 20s)"
    } else {
        ""
    };
    format!(
        "{emoji} {message}{delay_msg} {emoji}\n\n\
         {summary}\n\
         Stress Level: {}\n\
         Boss Alert Level: {}",
        report.stress, report.alert
    )
}

/// A catalog-driven break tool.
pub struct BreakTool {
    kind: &'static BreakKind,
    handler: Arc<BreakHandler>,
}

impl BreakTool {
    pub fn new(kind: &'static BreakKind, handler: Arc<BreakHandler>) -> Self {
        Self { kind, handler }
    }

    async fn run_diversion(&self) {
        match self.kind.diversion {
            Diversion::None => {}
            Diversion::OpenBrowser(url) => {
                tracing::info!(tool = self.kind.name, %url, "opening diversion in browser");
                browser::open_in_background(url);
                tokio::time::sleep(DIVERSION_PAUSE).await;
            }
            Diversion::MemeGallery => {
                let mut gallery: Vec<&str> = MEME_GALLERY.to_vec();
                gallery.shuffle(&mut rand::rng());
                for url in gallery.iter().take(MEMES_PER_BREAK) {
                    tracing::info!(tool = self.kind.name, %url, "opening meme");
                    browser::open_in_background(url);
                }
                tokio::time::sleep(DIVERSION_PAUSE).await;
            }
            Diversion::PowerDown => {
                tracing::info!("powering down... (not really)");
                tokio::time::sleep(DIVERSION_PAUSE).await;
            }
        }
    }
}

#[async_trait::async_trait]
impl Tool for BreakTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.kind.name.to_string(),
            description: self.kind.description.to_string(),
            input_schema: empty_input_schema(),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        self.run_diversion().await;

        let report = self.handler.record_break().await;
        let text = format_break_response(
            self.kind.emoji,
            self.kind.message,
            self.kind.summary,
            &report,
        );
        Ok(CallToolResult::text(text))
    }
}

/// Register every catalog break tool against the shared handler.
pub fn register_break_tools(registry: &mut ToolRegistry, handler: Arc<BreakHandler>) {
    for kind in BREAK_CATALOG {
        registry.register(Arc::new(BreakTool::new(kind, handler.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chillmcp_core::{ChillConfig, ServerState};

    fn quiet_handler() -> Arc<BreakHandler> {
        // Probability 0: alert never rises, so no penalty path in tests.
        let config = ChillConfig::new(0, 300).unwrap();
        Arc::new(BreakHandler::new(Arc::new(ServerState::new(config))))
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<&str> = BREAK_CATALOG.iter().map(|k| k.name).collect();
        assert_eq!(names.len(), 12);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_format_without_delay() {
        let report = BreakReport {
            stress: 23,
            alert: 1,
            delay_applied: false,
        };
        let text = format_break_response("🧘", "Taking a basic break.", "Break Summary: ok", &report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "🧘 Taking a basic break. 🧘");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Break Summary: ok");
        assert_eq!(lines[3], "Stress Level: 23");
        assert_eq!(lines[4], "Boss Alert Level: 1");
    }

    #[test]
    fn test_format_with_delay_annotation() {
        let report = BreakReport {
            stress: 0,
            alert: 5,
            delay_applied: true,
        };
        let text = format_break_response("☕", "Caffeine acquisition mission.", "s", &report);
        assert!(text.starts_with("☕ Caffeine acquisition mission. (delayed 20s) ☕\n\n"));
        assert!(text.ends_with("Boss Alert Level: 5"));
    }

    #[tokio::test]
    async fn test_take_a_break_reports_metrics() {
        let handler = quiet_handler();
        let tool = BreakTool::new(&BREAK_CATALOG[0], handler);

        let result = tool.execute(serde_json::Value::Null).await.unwrap();
        assert!(result.is_error.is_none());

        let crate::protocol::ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("Stress Level: "));
        assert!(text.contains("Boss Alert Level: 0"));
        assert!(!text.contains("delayed"));
    }

    #[tokio::test]
    async fn test_registration_covers_whole_catalog() {
        let mut registry = ToolRegistry::new();
        register_break_tools(&mut registry, quiet_handler());

        assert_eq!(registry.len(), BREAK_CATALOG.len());
        for kind in BREAK_CATALOG {
            assert!(registry.get(kind.name).is_some(), "missing {}", kind.name);
        }
    }
}
