//! Localized (ko-KR) status messages returned to clients.

pub mod auth {
    pub const INVALID_TOKEN: &str = "잘못된 또는 만료된 토큰입니다.";
}

pub mod request {
    pub const MALFORMED: &str = "요청 형식이 올바르지 않습니다.";
    pub const FILE_REQUIRED: &str = "이미지 파일은 필수 입력 사항입니다.";
    pub const FILE_TOO_LARGE: &str = "이미지 파일의 용량이 너무 큽니다.";
    pub const FILE_NOT_IMAGE: &str = "이미지 파일만 업로드할 수 있습니다.";
    pub const CURSOR_INVALID: &str = "cursor ID를 확인해주세요.";
    pub const INTERNAL: &str = "서버 내부 오류가 발생했습니다.";
}

pub mod user {
    pub const EMAIL_INVALID: &str = "유효한 이메일을 입력하세요.";
    pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 최소 10자리 이상이어야 합니다.";
    pub const NICKNAME_REQUIRED: &str = "이름을 입력하세요.";
    pub const IMAGE_URL_REQUIRED: &str = "imageUrl을 확인하세요.";
    pub const DESCRIPTION_EMPTY: &str = "설명을 입력하세요.";

    pub const EMAIL_TAKEN: &str = "이 이메일은 현재 사용중입니다. 다른 이메일을 입력해 주세요.";
    pub const EMAIL_UNKNOWN: &str = "해당 이메일은 가입 내역이 없습니다. 다시 한 번 확인해 주세요.";
    pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다. 다시 한 번 확인해 주세요.";
    pub const NOT_FOUND: &str = "요청한 사용자의 정보를 찾을 수 없습니다.";
    pub const IMAGE_NOT_FOUND: &str = "요청한 사용자의 이미지를 찾을 수 없습니다.";
    pub const POINT_NOT_FOUND: &str = "요청한 사용자의 포인트를 찾을 수 없습니다.";
    pub const NOT_SELF: &str = "본인의 정보만 수정하거나 삭제할 수 있습니다.";

    pub const CURRENT_FAILED: &str = "로그인 유저 확인에 실패했습니다.";
    pub const REGISTER_FAILED: &str = "회원가입에 실패했습니다.";
    pub const LOGIN_FAILED: &str = "로그인에 실패하셨습니다.";
    pub const COUNT_FAILED: &str = "전체 유저 수 불러오기에 실패했습니다.";
    pub const POINT_FAILED: &str = "유저 포인트 내역 불러오기에 실패했습니다.";
    pub const PROFILE_FAILED: &str = "유저 정보 불러오기에 실패했습니다.";
    pub const UPDATE_FAILED: &str = "유저 정보 수정하기에 실패했습니다.";
    pub const DELETE_FAILED: &str = "유저 정보 삭제하기에 실패했습니다.";

    pub const REGISTERED: &str = "회원가입이 성공적으로 완료되었습니다.";
    pub const LOGGED_IN: &str = "로그인이 성공적으로 완료되었습니다.";
    pub const LOGIN_VALID: &str = "정상적인 유저입니다.";
    pub const COUNTED: &str = "전체 유저 수 불러오기가 성공적으로 완료되었습니다.";
    pub const POINT_LOADED: &str = "유저 포인트 내역 불러오기가 성공적으로 완료되었습니다.";
    pub const PROFILE_LOADED: &str = "유저 정보 불러오기가 성공적으로 완료되었습니다.";
    pub const UPDATED: &str = "유저 정보 수정하기가 성공적으로 완료되었습니다.";
    pub const DELETED: &str = "유저 정보 삭제하기가 성공적으로 완료되었습니다.";
}

pub mod post {
    pub const CONTENT_REQUIRED: &str = "게시물 내용을 입력하세요.";
    pub const CONTENT_TOO_LONG: &str = "게시물 내용은 최대 200글자까지 허용됩니다.";

    pub const NOT_FOUND: &str = "요청한 게시물의 정보를 찾을 수 없습니다.";
    pub const NOT_OWNER_UPDATE: &str = "게시물 작성자만 수정할 수 있습니다.";
    pub const NOT_OWNER_DELETE: &str = "게시물 작성자만 삭제할 수 있습니다.";
    pub const FEED_END: &str = "전체 게시물 조회가 끝났습니다.";

    pub const FEED_FAILED: &str = "게시물 전체 조회를 실패했습니다.";
    pub const COUNT_FAILED: &str = "피드 수와 피드를 작성한 유저 수 불러오기에 실패했습니다.";
    pub const BY_USER_FAILED: &str = "유저가 작성한 피드 정보 불러오기에 실패했습니다.";
    pub const LIKED_BY_FAILED: &str = "유저가 좋아요한 피드 정보 불러오기에 실패했습니다.";
    pub const CREATE_FAILED: &str = "게시물 작성을 실패했습니다.";
    pub const DETAIL_FAILED: &str = "게시물 상세 조회를 실패했습니다.";
    pub const UPDATE_FAILED: &str = "게시물 수정을 실패했습니다.";
    pub const DELETE_FAILED: &str = "게시물 삭제를 실패했습니다.";

    pub const FEED_LOADED: &str = "게시물 전체 조회를 성공했습니다.";
    pub const COUNTED: &str = "피드 수와 피드를 작성한 유저 수 불러오기에 성공했습니다.";
    pub const BY_USER_LOADED: &str = "유저가 작성한 피드 정보 불러오기에 성공했습니다.";
    pub const LIKED_BY_LOADED: &str = "유저가 좋아요한 피드 정보 불러오기에 성공했습니다.";
    pub const CREATED: &str = "게시물 작성을 성공했습니다.";
    pub const DETAIL_LOADED: &str = "게시물 상세 조회를 성공했습니다.";
    pub const UPDATED: &str = "게시물 수정을 성공했습니다.";
    pub const DELETED: &str = "게시물 삭제를 성공했습니다.";
}

pub mod comment {
    pub const CONTENT_REQUIRED: &str = "댓글 내용을 입력하세요.";
    pub const CONTENT_TOO_LONG: &str = "댓글 내용은 최대 200글자까지 허용됩니다.";
    pub const PARENT_INVALID: &str = "게시물 부모 ID를 확인해주세요.";

    pub const NOT_FOUND: &str = "요청한 댓글의 정보를 찾을 수 없습니다.";
    pub const PARENT_NOT_FOUND: &str = "답글을 달 댓글을 찾을 수 없습니다.";
    pub const NOT_OWNER_UPDATE: &str = "댓글 작성자만 수정할 수 있습니다.";
    pub const NOT_OWNER_DELETE: &str = "댓글 작성자만 삭제할 수 있습니다.";
    pub const LIST_END: &str = "전체 댓글 조회가 끝났습니다.";

    pub const CREATE_FAILED: &str = "댓글 추가하기에 실패했습니다.";
    pub const LIST_FAILED: &str = "게시글 총 댓글 불러오기에 실패했습니다.";
    pub const UPDATE_FAILED: &str = "댓글 수정하기에 실패했습니다.";
    pub const DELETE_FAILED: &str = "댓글 삭제하기를 실패했습니다.";

    pub const CREATED: &str = "댓글 추가하기에 성공했습니다.";
    pub const LISTED: &str = "게시글 총 댓글 불러오기에 성공하셨습니다.";
    pub const UPDATED: &str = "댓글 수정하기에 성공했습니다.";
    pub const DELETED: &str = "댓글 삭제하기에 성공했습니다.";
}

pub mod like {
    pub const ALREADY_LIKED: &str = "해당 게시물에는 이미 사용자의 좋아요가 있습니다.";
    pub const NOT_LIKED: &str = "해당 게시물에는 사용자의 좋아요가 없습니다.";

    pub const CREATE_FAILED: &str = "좋아요 목록 생성에 실패하였습니다.";
    pub const CHECK_FAILED: &str = "좋아요 여부 확인 및 좋아요 누적수 불러오기에 실패했습니다.";
    pub const DELETE_FAILED: &str = "좋아요 목록 삭제에 실패하였습니다.";

    pub const CREATED: &str = "좋아요 목록 생성에 성공하셨습니다.";
    pub const CHECKED: &str = "좋아요 여부 확인 및 좋아요 누적수 불러오기에 성공했습니다.";
    pub const DELETED: &str = "좋아요 목록 삭제에 성공하였습니다.";
}

pub mod rank {
    pub const LIST_FAILED: &str = "Top10 랭킹 리스트 불러오기에 실패했습니다.";
    pub const LISTED: &str = "Top10 랭킹 리스트 불러오기에 성공했습니다.";
}

pub mod search {
    pub const KEYWORD_REQUIRED: &str = "검색값을 확인해주세요.";
    pub const END: &str = "검색어가 포함된 게시물 조회가 끝났습니다.";
    pub const FAILED: &str = "키워드를 포함한 게시물 불러오기에 실패했습니다.";
    pub const FOUND: &str = "키워드를 포함한 게시물 불러오기에 성공했습니다.";
}
