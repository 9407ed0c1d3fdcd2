//! Template sources shared by test suites.

/// Tera page printing `title` and `name`.
pub const TERA_PAGE: &str = "<h1>{{ title }}</h1><p>Hello {{ name }}</p>";

/// Tera layout embedding the page body unescaped.
pub const TERA_LAYOUT: &str = "<html><title>{{ title }}</title><body>{{ body | safe }}</body></html>";

/// Handlebars page.
pub const HANDLEBARS_PAGE: &str = "<h1>{{title}}</h1>";

/// Handlebars layout embedding the page body unescaped.
pub const HANDLEBARS_LAYOUT: &str = "<main>{{{body}}}</main>";

/// Tera source that fails to parse.
pub const TERA_SYNTAX_ERROR: &str = "line one\n\n{{ variable >+ invalid }}";
