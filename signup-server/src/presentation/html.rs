//! Server-rendered markup for the registration page.

use movies_client::render::escape_html as escape;

/// Red paragraph per error, then the green success notice if any.
pub fn feedback(errors: &[String], success: Option<&str>) -> String {
    let mut out = String::new();
    for err in errors {
        out.push_str(&format!("<p style='color:red;'>{}</p>\n", escape(err)));
    }
    if let Some(message) = success {
        out.push_str(&format!("<p style='color:green;'>{}</p>\n", escape(message)));
    }
    out
}

/// Full page: feedback above the form. Passwords are never filled back in.
pub fn registration_page(feedback: &str, name: &str, email: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Register</title>
</head>
<body>
<h1>Register</h1>
{feedback}<form method="post" action="/register">
<label>Name <input type="text" name="name" value="{name}"></label>
<label>Email <input type="email" name="email" value="{email}"></label>
<label>Password <input type="password" name="password"></label>
<label>Confirm password <input type="password" name="confirm_password"></label>
<button type="submit">Register</button>
</form>
</body>
</html>
"#,
        feedback = feedback,
        name = escape(name),
        email = escape(email),
    )
}
