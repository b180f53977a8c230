//! Landing page with the decode form.

/// Static HTML served at `/`. Submits to `/decode` and shows the JSON result.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Vehicle Decoder</title>
  <style>
    body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
    fieldset { margin-bottom: 1rem; }
    label { display: block; margin: .25rem 0; }
    pre { background: #f4f4f4; padding: 1rem; overflow-x: auto; }
  </style>
</head>
<body>
  <h1>Vehicle Decoder</h1>
  <form id="decode-form">
    <fieldset>
      <legend>Decode by VIN</legend>
      <label>VIN <input name="vin" maxlength="17"></label>
      <label>Model year (optional) <input name="year" maxlength="4"></label>
    </fieldset>
    <fieldset>
      <legend>Or by license plate</legend>
      <label>Plate <input name="plate"></label>
      <label>State <input name="state" maxlength="3"></label>
    </fieldset>
    <button type="submit">Decode</button>
  </form>
  <pre id="result"></pre>
  <script>
    document.getElementById("decode-form").addEventListener("submit", async (event) => {
      event.preventDefault();
      const body = new URLSearchParams(new FormData(event.target));
      const output = document.getElementById("result");
      try {
        const response = await fetch("/decode", { method: "POST", body });
        output.textContent = JSON.stringify(await response.json(), null, 2);
      } catch (err) {
        output.textContent = "Request failed: " + err;
      }
    });
  </script>
</body>
</html>
"#;
