//! The single-page UI served at `/`.
//!
//! Picking a PDF previews its text via `POST /api/v1/extract`. Upload controls and text
//! areas feed `POST /api/v1/analyze/upload`; the response is rendered as sections, or as
//! raw model output when it could not be sectioned.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>AI Resume Analyzer</title>
  <style>
    *, *::before, *::after { box-sizing: border-box; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      max-width: 760px; margin: 2rem auto; padding: 0 1rem;
      color: #1f2328; background: #fafafa;
    }
    h1 { font-size: 1.6rem; }
    h2 { font-size: 1.15rem; margin-top: 1.75rem; }
    h3 { font-size: 1rem; margin: 1.25rem 0 0.4rem; }
    label { display: block; margin: 0.75rem 0 0.25rem; font-weight: 600; }
    textarea { width: 100%; height: 14rem; padding: 0.5rem; font: inherit; }
    button {
      margin-top: 1.25rem; padding: 0.6rem 1.4rem; border: 0; border-radius: 6px;
      background: #2f6feb; color: #fff; font-size: 1rem; cursor: pointer;
    }
    button:disabled { background: #8aa9e6; cursor: progress; }
    .banner { padding: 0.6rem 0.9rem; border-radius: 6px; margin: 0.75rem 0; white-space: pre-wrap; }
    .success { background: #dafbe1; border: 1px solid #4ac26b; }
    .warning { background: #fff8c5; border: 1px solid #d4a72c; }
    .error   { background: #ffebe9; border: 1px solid #ff8182; }
    .section { padding-left: 15px; white-space: pre-wrap; }
    #busy { display: none; margin-top: 0.75rem; color: #57606a; }
    hr { border: 0; border-top: 1px solid #d0d7de; margin: 1.5rem 0; }
  </style>
</head>
<body>
  <h1>AI Resume Analyzer</h1>
  <p>Upload your resume and job description (PDF or text) to get AI-powered feedback.</p>

  <form id="analyze-form">
    <h2>Upload PDF Files</h2>
    <label for="resume_pdf">Upload Resume (PDF)</label>
    <input type="file" id="resume_pdf" name="resume_pdf" accept="application/pdf,.pdf" />
    <label for="job_description_pdf">Upload Job Description (PDF)</label>
    <input type="file" id="job_description_pdf" name="job_description_pdf" accept="application/pdf,.pdf" />

    <hr />
    <h2>Or Paste Manually</h2>
    <label for="resume_text">Paste your resume text here</label>
    <textarea id="resume_text" name="resume_text"></textarea>
    <label for="job_description_text">Paste the job description here</label>
    <textarea id="job_description_text" name="job_description_text"></textarea>

    <button type="submit" id="analyze">Analyze Resume</button>
    <div id="busy">Analyzing...</div>
  </form>

  <div id="banners"></div>
  <div id="results"></div>

  <script>
    const form = document.getElementById("analyze-form");
    const button = document.getElementById("analyze");
    const busy = document.getElementById("busy");
    const banners = document.getElementById("banners");
    const results = document.getElementById("results");

    function banner(level, text) {
      const div = document.createElement("div");
      div.className = "banner " + level;
      div.textContent = text;
      banners.appendChild(div);
    }

    function section(title, text) {
      const h = document.createElement("h3");
      h.textContent = title;
      const body = document.createElement("div");
      body.className = "section";
      body.textContent = text;
      results.append(h, body);
    }

    function render(report) {
      const heading = document.createElement("h2");
      heading.textContent = "Resume Analysis";
      results.appendChild(heading);

      const s = report.sections;
      if (s.status === "parsed") {
        section("Extracted Key Skills", s.skills);
        section("Match Score", s.score);
        section("Suggestions for Improvement", s.suggestions);
      } else if (s.status === "partially_parsed") {
        section("Skills and Match Score", s.combined);
        section("Suggestions for Improvement", s.suggestions);
      } else {
        section("Model Output", s.raw);
      }
    }

    // Preview the text of a picked PDF in the matching text area.
    async function preview(input, textarea, label) {
      const file = input.files[0];
      if (!file) return;
      const data = new FormData();
      data.append("file", file);
      try {
        const response = await fetch("/api/v1/extract", { method: "POST", body: data });
        const payload = await response.json().catch(() => null);
        if (response.ok && payload) {
          if (payload.text) textarea.value = payload.text;
          if (payload.notice) banner("warning", payload.notice);
        } else if (payload && payload.error) {
          banner("warning", label + ": " + payload.error.message);
        }
      } catch (err) {
        banner("warning", label + ": could not preview PDF (" + err + ")");
      }
    }

    const resumePdf = document.getElementById("resume_pdf");
    const jdPdf = document.getElementById("job_description_pdf");
    resumePdf.addEventListener("change", () =>
      preview(resumePdf, document.getElementById("resume_text"), "Resume"));
    jdPdf.addEventListener("change", () =>
      preview(jdPdf, document.getElementById("job_description_text"), "Job description"));

    form.addEventListener("submit", async (event) => {
      event.preventDefault();
      banners.replaceChildren();
      results.replaceChildren();

      button.disabled = true;
      busy.style.display = "block";
      try {
        const response = await fetch("/api/v1/analyze/upload", {
          method: "POST",
          body: new FormData(form),
        });
        const payload = await response.json().catch(() => null);

        if (response.ok && payload) {
          (payload.notices || []).forEach((n) => banner("warning", n));
          banner("success", "Analysis complete!");
          render(payload);
        } else if (payload && payload.error) {
          (payload.error.notices || []).forEach((n) => banner("warning", n));
          banner(payload.error.level || "error", payload.error.message);
        } else {
          banner("error", "An error occurred (HTTP " + response.status + ")");
        }
      } catch (err) {
        banner("error", "An error occurred: " + err);
      } finally {
        button.disabled = false;
        busy.style.display = "none";
      }
    });
  </script>
</body>
</html>
"#;

/// GET / — the analyzer page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
