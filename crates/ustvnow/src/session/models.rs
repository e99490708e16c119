use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    pub results: ChannelResults,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResults {
    pub streamnames: Vec<StreamName>,
}

#[derive(Debug, Deserialize)]
pub struct StreamName {
    pub sname: String,
    pub img: String,
    pub scode: String,
    pub callsign: String,
    /// Availability flag, sent as a number (0 / 1).
    pub t: Flag,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub enum Flag {
    Number(i64),
    Bool(bool),
}

impl Flag {
    pub fn is_set(self) -> bool {
        match self {
            Flag::Number(n) => n != 0,
            Flag::Bool(b) => b,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StreamResponse {
    #[serde(default)]
    pub stream: Option<String>,
}
