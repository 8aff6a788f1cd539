//! HTML Templates - 首页与详情页渲染

use serde_json::Value;
use std::fmt::Write;

use crate::application::{DetailsView, IndexView};

const STYLE: &str = r#"<style>
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
textarea { width: 100%; min-height: 6rem; }
table { border-collapse: collapse; width: 100%; margin-bottom: 2rem; }
td, th { border: 1px solid #ccc; padding: 0.3rem 0.5rem; text-align: left; vertical-align: top; }
pre { margin: 0; white-space: pre-wrap; }
.row { margin: 0.8rem 0; }
</style>"#;

const SCRIPT: &str = r#"<script>
function synthesize() {
  const text = document.getElementById("text").value;
  const speaker = document.getElementById("speaker_id");
  const style = document.getElementById("style_wav");
  const params = new URLSearchParams({
    text: text,
    speaker_id: speaker ? speaker.value : "",
    style_wav: style ? style.value : "",
  });
  const button = document.getElementById("speak-button");
  const status = document.getElementById("status");
  button.disabled = true;
  status.textContent = "Synthesizing...";
  fetch("/api/tts?" + params.toString(), { cache: "no-cache" })
    .then(function (res) {
      if (!res.ok) {
        return res.json().then(function (body) { throw new Error(body.error || res.status); });
      }
      return res.blob();
    })
    .then(function (blob) {
      const audio = document.getElementById("audio");
      audio.src = URL.createObjectURL(blob);
      audio.play();
      status.textContent = "";
    })
    .catch(function (err) { status.textContent = "Error: " + err.message; })
    .finally(function () { button.disabled = false; });
  return false;
}
</script>"#;

/// 转义 HTML 特殊字符
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

pub fn render_index(view: &IndexView) -> String {
    let mut body = String::new();

    body.push_str("<h1>TTS Server</h1>\n");
    if let Some(name) = &view.model_name {
        let _ = writeln!(body, "<p>Model: <code>{}</code></p>", escape_html(name));
    }
    if view.show_details {
        body.push_str("<p><a href=\"/details\">Model details</a></p>\n");
    }

    body.push_str("<form onsubmit=\"return synthesize();\">\n");
    body.push_str(
        "<div class=\"row\"><textarea id=\"text\" name=\"text\" placeholder=\"Type here...\"></textarea></div>\n",
    );

    if view.use_multi_speaker {
        body.push_str("<div class=\"row\"><label for=\"speaker_id\">Speaker</label> ");
        match &view.speaker_ids {
            Some(ids) => {
                body.push_str("<select id=\"speaker_id\" name=\"speaker_id\">\n");
                for id in ids {
                    let id = escape_html(id);
                    let _ = writeln!(body, "<option value=\"{}\">{}</option>", id, id);
                }
                body.push_str("</select>");
            }
            None => body.push_str("<input id=\"speaker_id\" name=\"speaker_id\" type=\"text\">"),
        }
        body.push_str("</div>\n");
    }

    if view.use_gst {
        body.push_str(
            "<div class=\"row\"><label for=\"style_wav\">Style</label> \
             <input id=\"style_wav\" name=\"style_wav\" type=\"text\" \
             placeholder='{\"0\": 0.1}' size=\"40\"></div>\n",
        );
    }

    body.push_str("<div class=\"row\"><button id=\"speak-button\" type=\"submit\">Speak</button> <span id=\"status\"></span></div>\n");
    body.push_str("</form>\n");
    body.push_str("<audio id=\"audio\" controls></audio>\n");
    let _ = writeln!(body, "<p><small>Sample rate: {} Hz</small></p>", view.sample_rate);
    body.push_str(SCRIPT);
    body.push('\n');

    page("TTS Server", &body)
}

pub fn render_details(view: &DetailsView) -> String {
    let mut body = String::new();

    body.push_str("<h1>Model details</h1>\n<p><a href=\"/\">Back</a></p>\n");

    body.push_str("<h2>Arguments</h2>\n<table>\n<tr><th>Argument</th><th>Value</th></tr>\n");
    for (key, value) in &view.args {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(key),
            escape_html(value)
        );
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Model config</h2>\n");
    config_table(&mut body, &view.model_config);

    if let Some(vocoder) = &view.vocoder_config {
        body.push_str("<h2>Vocoder config</h2>\n");
        config_table(&mut body, vocoder);
    }

    page("Model details", &body)
}

fn config_table(body: &mut String, config: &Value) {
    let Some(map) = config.as_object() else {
        let _ = writeln!(body, "<pre>{}</pre>", escape_html(&pretty(config)));
        return;
    };

    body.push_str("<table>\n<tr><th>Key</th><th>Value</th></tr>\n");
    for (key, value) in map {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td><pre>{}</pre></td></tr>",
            escape_html(key),
            escape_html(&pretty(value))
        );
    }
    body.push_str("</table>\n");
}

fn pretty(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
