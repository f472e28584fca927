use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub code_num: u16,
    pub message: &'static str,
}

impl Status {
    pub const OK: Status = Status {
        code_num: 200,
        message: "OK",
    };
    pub const MOVED_TEMPORARILY: Status = Status {
        code_num: 302,
        message: "MOVED TEMPORARILY",
    };
    pub const BAD_REQUEST: Status = Status {
        code_num: 400,
        message: "BAD REQUEST",
    };
    pub const FORBIDDEN: Status = Status {
        code_num: 403,
        message: "FORBIDDEN",
    };
    pub const NOT_FOUND: Status = Status {
        code_num: 404,
        message: "Not Found",
    };
    pub const INTERNAL_SERVER_ERROR: Status = Status {
        code_num: 500,
        message: "INTERNAL SERVER ERROR",
    };
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code_num, self.message)
    }
}
