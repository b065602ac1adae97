use crate::domain::session::{RenderOutcome, SpeechForm};
use crate::domain::speech::{AudioFormat, Voice};

const TITLE: &str = "OpenAI Text-to-Speech";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fff; color: #222; }
.main-header { font-size: 3rem; font-weight: bold; text-align: center; margin: 2rem 0 0.5rem;
  background: linear-gradient(90deg, #667eea 0%, #764ba2 100%);
  -webkit-background-clip: text; -webkit-text-fill-color: transparent; background-clip: text; }
.subtitle { text-align: center; font-size: 1.2rem; color: #666; margin-bottom: 3rem; }
.layout { display: grid; grid-template-columns: 1fr 2fr 1fr; gap: 2rem; padding: 0 2rem; }
textarea, select { width: 100%; box-sizing: border-box; font: inherit; }
button, .download { background: linear-gradient(90deg, #667eea 0%, #764ba2 100%); color: white;
  border: none; border-radius: 10px; padding: 0.5rem 2rem; font-weight: bold; text-decoration: none; display: inline-block; }
.audio-container { background: #f8f9fa; border-radius: 10px; padding: 1rem; margin: 1rem 0; }
.info { background: #e8f0fe; padding: 0.75rem; border-radius: 6px; }
.success { background: #e6f4ea; padding: 0.75rem; border-radius: 6px; }
.warning { background: #fef7e0; padding: 0.75rem; border-radius: 6px; }
.error { background: #fce8e6; padding: 0.75rem; border-radius: 6px; }
.caption { color: #666; font-size: 0.9rem; }
footer { text-align: center; color: #666; padding: 1rem; border-top: 1px solid #eee; margin-top: 2rem; }
"#;

/// Everything needed to draw the page for one render cycle
pub struct PageView<'a> {
    pub form: &'a SpeechForm,
    pub outcome: &'a RenderOutcome,
    pub audio_format: AudioFormat,
    pub long_text_warning_chars: usize,
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1 class="main-header">{title}</h1>
<p class="subtitle">Convert your text into natural-sounding speech using AI</p>
{body}
<footer>
<p>Powered by OpenAI's Text-to-Speech API</p>
<p><small>Make sure to add your OpenAI API key to the .env file to use this app.</small></p>
</footer>
</body>
</html>
"#,
        title = TITLE,
        style = STYLE,
        body = body
    )
}

/// Page shown when no credential is configured. Renders no input controls.
pub fn render_halted(message: &str) -> String {
    layout(&format!(
        r#"<main class="layout"><div></div><div><p class="error">{}</p></div><div></div></main>"#,
        escape_html(message)
    ))
}

pub fn render_page(view: &PageView<'_>) -> String {
    layout(&format!(
        r#"<form method="post" action="/" onsubmit="document.getElementById('busy').hidden = false">
<main class="layout">
{settings}
{input}
{output}
</main>
</form>"#,
        settings = settings_panel(view),
        input = input_panel(view),
        output = output_panel(view),
    ))
}

fn settings_panel(view: &PageView<'_>) -> String {
    let options: String = Voice::ALL
        .iter()
        .map(|voice| {
            let selected = if voice.id() == view.form.voice { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                voice.id(),
                selected,
                escape_html(voice.label())
            )
        })
        .collect();

    format!(
        r#"<section>
<h2>Settings</h2>
<label for="voice">Choose Voice</label>
<select id="voice" name="voice">{options}</select>
<label for="instructions">Voice Instructions (Optional)</label>
<textarea id="instructions" name="instructions" rows="4" title="Provide specific instructions about tone, pace, or style" placeholder="e.g., Speak in a cheerful and positive tone, or use a professional business tone">{instructions}</textarea>
<p class="info"><strong>Tip:</strong> The generated audio will be in {format} format and optimized for web playback.</p>
</section>"#,
        options = options,
        instructions = escape_html(&view.form.instructions),
        format = view.audio_format.extension().to_uppercase(),
    )
}

fn input_panel(view: &PageView<'_>) -> String {
    let char_count = view.form.text.chars().count();

    let mut notes = String::new();
    if char_count > 0 {
        notes.push_str(&format!(r#"<p class="caption">Characters: {}</p>"#, char_count));
        if char_count > view.long_text_warning_chars {
            notes.push_str(
                r#"<p class="warning">Very long text may take longer to process and could be truncated.</p>"#,
            );
        }
    }

    format!(
        r#"<section>
<h2>Text Input</h2>
<label for="text">Enter your text:</label>
<textarea id="text" name="text" rows="10" onchange="this.form.requestSubmit()" title="Enter any text you'd like to convert to speech. Maximum recommended length is about {limit} characters." placeholder="Type the text you want to convert to speech...">{text}</textarea>
{notes}
<button type="submit">Generate Speech</button>
<p id="busy" class="info" hidden>Generating speech... This may take a few moments.</p>
</section>"#,
        limit = view.long_text_warning_chars,
        text = escape_html(&view.form.text),
        notes = notes,
    )
}

fn output_panel(view: &PageView<'_>) -> String {
    let content = match view.outcome {
        RenderOutcome::Empty => {
            r#"<p class="info">Enter some text to generate speech</p>"#.to_string()
        }
        RenderOutcome::Failed(detail) => format!(
            r#"<p class="error">Error generating speech: {}</p>"#,
            escape_html(detail)
        ),
        RenderOutcome::Ready(result) => format!(
            r#"<div class="audio-container">
<p class="success">Speech generated successfully!</p>
<audio controls src="/audio?v={version}" type="{mime}"></audio>
</div>
<a class="download" href="/download" download="{file_name}">Download Audio</a>"#,
            version = result.generated_at.timestamp_millis(),
            mime = result.format.mime_type(),
            file_name = escape_html(&result.file_name),
        ),
    };

    format!(
        r#"<section>
<h2>Audio Output</h2>
{}
</section>"#,
        content
    )
}
