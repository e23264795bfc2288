//! Catalogue of backend routes.

/// One backend capability. Every endpoint is a JSON POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Auth,
    Register,
    PassportConfirm,
    CarSearch,
    CarSearchByFio,
    CarSearchByPassport,
    CarSearchByPlateMask,
    TrackSearch,
    TrackSearchByFio,
    TrackSearchByPassport,
    TrackSearchByDate,
    TrackSearchByPlateMask,
    Route,
    AvgSpeed,
}

impl Endpoint {
    pub const ALL: [Endpoint; 14] = [
        Endpoint::Auth,
        Endpoint::Register,
        Endpoint::PassportConfirm,
        Endpoint::CarSearch,
        Endpoint::CarSearchByFio,
        Endpoint::CarSearchByPassport,
        Endpoint::CarSearchByPlateMask,
        Endpoint::TrackSearch,
        Endpoint::TrackSearchByFio,
        Endpoint::TrackSearchByPassport,
        Endpoint::TrackSearchByDate,
        Endpoint::TrackSearchByPlateMask,
        Endpoint::Route,
        Endpoint::AvgSpeed,
    ];

    /// Route segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Auth => "/user/auth",
            Endpoint::Register => "/user/registr",
            Endpoint::PassportConfirm => "/user/passport-confirm",
            Endpoint::CarSearch => "/car/search",
            Endpoint::CarSearchByFio => "/car/search/by-fio",
            Endpoint::CarSearchByPassport => "/car/search/by-passport",
            Endpoint::CarSearchByPlateMask => "/car/search/by-gos-num-mask",
            Endpoint::TrackSearch => "/track-info/search",
            Endpoint::TrackSearchByFio => "/track-info/search/by-fio",
            Endpoint::TrackSearchByPassport => "/track-info/search/by-passport",
            Endpoint::TrackSearchByDate => "/track-info/search/by-date",
            Endpoint::TrackSearchByPlateMask => "/track-info/search/by-gos-num-mask",
            Endpoint::Route => "/car/route",
            Endpoint::AvgSpeed => "/camera/avg-speed",
        }
    }
}
