//! Status taxonomy: maps transport and domain codes to user-facing text.
//!
//! Two independent total lookups:
//! - transport status (the HTTP status, or the 503 sentinel) to a sentence
//!   with no field association;
//! - domain status (`Status.code` inside a decoded body) to a message plus
//!   the tag of the input group the message belongs to.
//!
//! Codes 1001 and 2006 intentionally share a message.

/// Input group an error message is attached to on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorField {
    /// Success; nothing to attach.
    None,
    Date,
    LicensePlate,
    LicensePlateMask,
    Credentials,
    Email,
    Password,
    Passport,
    Camera,
    Speed,
    /// Not tied to one input: shown in the screen-wide error slot.
    All,
}

impl ErrorField {
    /// The tag the UI uses to look up the error label.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorField::None => "",
            ErrorField::Date => "date",
            ErrorField::LicensePlate => "gos_num",
            ErrorField::LicensePlateMask => "gos_num_mask",
            ErrorField::Credentials => "login or pswd",
            ErrorField::Email => "email",
            ErrorField::Password => "pswd",
            ErrorField::Passport => "passport",
            ErrorField::Camera => "camera",
            ErrorField::Speed => "speed",
            ErrorField::All => "all",
        }
    }
}

/// Known domain status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainStatus {
    Ok,
    InvalidDate,
    InvalidLicensePlate,
    InvalidLicensePlateMask,
    InvalidCredentials,
    InvalidEmail,
    InvalidPassword,
    PasswordsMismatch,
    InvalidPassport,
    PassportExists,
    InvalidTime,
    EmailExists,
    EmailNotFound,
    CameraNotFound,
    AvgSpeedNotFound,
    /// Any code not listed above.
    Unknown(i64),
}

impl DomainStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => DomainStatus::Ok,
            1001 => DomainStatus::InvalidDate,
            1002 => DomainStatus::InvalidLicensePlate,
            1003 => DomainStatus::InvalidLicensePlateMask,
            2000 => DomainStatus::InvalidCredentials,
            2001 => DomainStatus::InvalidEmail,
            2002 => DomainStatus::InvalidPassword,
            2003 => DomainStatus::PasswordsMismatch,
            2004 => DomainStatus::InvalidPassport,
            2005 => DomainStatus::PassportExists,
            2006 => DomainStatus::InvalidTime,
            3001 => DomainStatus::EmailExists,
            3002 => DomainStatus::EmailNotFound,
            4002 => DomainStatus::CameraNotFound,
            4003 => DomainStatus::AvgSpeedNotFound,
            other => DomainStatus::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            DomainStatus::Ok => 0,
            DomainStatus::InvalidDate => 1001,
            DomainStatus::InvalidLicensePlate => 1002,
            DomainStatus::InvalidLicensePlateMask => 1003,
            DomainStatus::InvalidCredentials => 2000,
            DomainStatus::InvalidEmail => 2001,
            DomainStatus::InvalidPassword => 2002,
            DomainStatus::PasswordsMismatch => 2003,
            DomainStatus::InvalidPassport => 2004,
            DomainStatus::PassportExists => 2005,
            DomainStatus::InvalidTime => 2006,
            DomainStatus::EmailExists => 3001,
            DomainStatus::EmailNotFound => 3002,
            DomainStatus::CameraNotFound => 4002,
            DomainStatus::AvgSpeedNotFound => 4003,
            DomainStatus::Unknown(code) => code,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DomainStatus::Ok => "Ok",
            DomainStatus::InvalidDate | DomainStatus::InvalidTime => "Неверный формат даты",
            DomainStatus::InvalidLicensePlate => "Неверный формат гос.номер",
            DomainStatus::InvalidLicensePlateMask => "Неверный формат маски гос.номера",
            DomainStatus::InvalidCredentials => "Неверный логин или пароль",
            DomainStatus::InvalidEmail => "Неверный формат почты",
            DomainStatus::InvalidPassword => "Пароль должен быть не менее 8 символов",
            DomainStatus::PasswordsMismatch => "Пароли не совпадают",
            DomainStatus::InvalidPassport => "Некорректные пасспортные данные",
            DomainStatus::PassportExists => "Пасспортные данные уже зарегистрированы",
            DomainStatus::EmailExists => "Пользователь с данной почтой уже существует",
            DomainStatus::EmailNotFound => "Пользователь с данной почтой не найден",
            DomainStatus::CameraNotFound => "Камера не найдена",
            DomainStatus::AvgSpeedNotFound => "Средняя скорость не найдена",
            DomainStatus::Unknown(_) => UNKNOWN_ERROR,
        }
    }

    pub fn field(self) -> ErrorField {
        match self {
            DomainStatus::Ok => ErrorField::None,
            DomainStatus::InvalidDate | DomainStatus::InvalidTime => ErrorField::Date,
            DomainStatus::InvalidLicensePlate => ErrorField::LicensePlate,
            DomainStatus::InvalidLicensePlateMask => ErrorField::LicensePlateMask,
            DomainStatus::InvalidCredentials => ErrorField::Credentials,
            DomainStatus::InvalidEmail
            | DomainStatus::EmailExists
            | DomainStatus::EmailNotFound => ErrorField::Email,
            DomainStatus::InvalidPassword | DomainStatus::PasswordsMismatch => {
                ErrorField::Password
            }
            DomainStatus::InvalidPassport | DomainStatus::PassportExists => ErrorField::Passport,
            DomainStatus::CameraNotFound => ErrorField::Camera,
            DomainStatus::AvgSpeedNotFound => ErrorField::Speed,
            DomainStatus::Unknown(_) => ErrorField::All,
        }
    }
}

/// Fallback text for codes neither table knows.
pub const UNKNOWN_ERROR: &str = "UNKNOWN ERROR";

/// Status code reported when no HTTP response was obtained at all.
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// Map a domain code to `(message, field tag)`.
pub fn domain_status_to_message(code: i64) -> (&'static str, &'static str) {
    let status = DomainStatus::from_code(code);
    (status.message(), status.field().as_str())
}

/// Map a transport status to a sentence.
pub fn transport_status_to_message(status: u16) -> &'static str {
    match status {
        200 => "Ok",
        404 => "Не найдено",
        422 => "Необрабатываемый объект",
        500 => "Внутренняя ошибка сервера",
        SERVICE_UNAVAILABLE => "Сервер не запущен",
        _ => UNKNOWN_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_domain_code_has_its_pair() {
        let table: &[(i64, &str, &str)] = &[
            (0, "Ok", ""),
            (1001, "Неверный формат даты", "date"),
            (1002, "Неверный формат гос.номер", "gos_num"),
            (1003, "Неверный формат маски гос.номера", "gos_num_mask"),
            (2000, "Неверный логин или пароль", "login or pswd"),
            (2001, "Неверный формат почты", "email"),
            (2002, "Пароль должен быть не менее 8 символов", "pswd"),
            (2003, "Пароли не совпадают", "pswd"),
            (2004, "Некорректные пасспортные данные", "passport"),
            (2005, "Пасспортные данные уже зарегистрированы", "passport"),
            (2006, "Неверный формат даты", "date"),
            (3001, "Пользователь с данной почтой уже существует", "email"),
            (3002, "Пользователь с данной почтой не найден", "email"),
            (4002, "Камера не найдена", "camera"),
            (4003, "Средняя скорость не найдена", "speed"),
        ];
        for &(code, message, field) in table {
            assert_eq!(domain_status_to_message(code), (message, field), "code {code}");
            assert_eq!(DomainStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn unmapped_domain_codes_fall_back_to_all() {
        for code in [-1, 1, 999, 4001, 9999, i64::MAX] {
            assert_eq!(domain_status_to_message(code), (UNKNOWN_ERROR, "all"));
            assert_eq!(DomainStatus::from_code(code), DomainStatus::Unknown(code));
        }
    }

    #[test]
    fn transport_table() {
        assert_eq!(transport_status_to_message(200), "Ok");
        assert_eq!(transport_status_to_message(404), "Не найдено");
        assert_eq!(transport_status_to_message(422), "Необрабатываемый объект");
        assert_eq!(transport_status_to_message(500), "Внутренняя ошибка сервера");
        assert_eq!(transport_status_to_message(503), "Сервер не запущен");
        for other in [0, 201, 400, 401, 502, 504] {
            assert_eq!(transport_status_to_message(other), UNKNOWN_ERROR);
        }
    }
}
