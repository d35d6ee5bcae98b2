use uuid::Uuid;

use otpgate_auth::error::AuthServiceError;
use otpgate_auth::usecase::login::{MobileLoginInput, MobileLoginUseCase};
use otpgate_auth::usecase::otp::IssueOtpUseCase;
use otpgate_auth::usecase::verify::{VerifyOtpInput, VerifyOtpUseCase};
use otpgate_auth_types::token::validate_session_token;

use crate::helpers::{
    MockOtpRepo, MockUserRepo, TEST_COUNTRY_CODE, TEST_JWT_SECRET, TEST_MOBILE, test_otp,
    test_user,
};

fn verify_usecase(
    users: MockUserRepo,
    otps: MockOtpRepo,
) -> VerifyOtpUseCase<MockUserRepo, MockOtpRepo> {
    VerifyOtpUseCase {
        users,
        otps,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: 14400,
    }
}

fn verify_input(otp_id: Uuid, otp: &str) -> VerifyOtpInput {
    VerifyOtpInput {
        mobile_number: TEST_MOBILE.to_owned(),
        country_code: TEST_COUNTRY_CODE,
        otp_id: otp_id.to_string(),
        otp: otp.to_owned(),
    }
}

async fn expect_error(
    usecase: &VerifyOtpUseCase<MockUserRepo, MockOtpRepo>,
    input: VerifyOtpInput,
) -> AuthServiceError {
    match usecase.execute(input).await {
        Err(e) => e,
        Ok(out) => panic!("expected error, got {out:?}"),
    }
}

#[tokio::test]
async fn should_issue_token_for_correct_code() {
    let user = test_user();
    let otp = test_otp(user.id, "482913", 300);
    let otps = MockOtpRepo::new(vec![otp.clone()]);
    let stored = otps.otps_handle();
    let usecase = verify_usecase(MockUserRepo::new(vec![user.clone()]), otps);

    let out = usecase.execute(verify_input(otp.id, "482913")).await.unwrap();

    assert_eq!(out.user.id, user.id);
    let session = validate_session_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(session.user_id, user.id);
    assert_eq!(session.mobile_number, TEST_MOBILE);
    assert!(stored.lock().unwrap()[0].verified);
}

#[tokio::test]
async fn should_reject_unknown_user() {
    let user = test_user();
    let otp = test_otp(user.id, "482913", 300);
    let usecase = verify_usecase(MockUserRepo::empty(), MockOtpRepo::new(vec![otp.clone()]));

    let err = expect_error(&usecase, verify_input(otp.id, "482913")).await;
    assert!(matches!(err, AuthServiceError::UserNotFound), "got {err:?}");
}

#[tokio::test]
async fn should_reject_unknown_otp_id() {
    let usecase = verify_usecase(MockUserRepo::new(vec![test_user()]), MockOtpRepo::empty());

    let err = expect_error(&usecase, verify_input(Uuid::new_v4(), "482913")).await;
    assert!(matches!(err, AuthServiceError::OtpNotFound), "got {err:?}");
}

#[tokio::test]
async fn should_reject_malformed_otp_id_as_not_found() {
    let usecase = verify_usecase(MockUserRepo::new(vec![test_user()]), MockOtpRepo::empty());
    let mut input = verify_input(Uuid::nil(), "482913");
    input.otp_id = "not-a-uuid".to_owned();

    let err = expect_error(&usecase, input).await;
    assert!(matches!(err, AuthServiceError::OtpNotFound), "got {err:?}");
}

#[tokio::test]
async fn should_reject_otp_belonging_to_another_user() {
    let user = test_user();
    let other = test_otp(Uuid::new_v4(), "482913", 300);
    let usecase = verify_usecase(
        MockUserRepo::new(vec![user]),
        MockOtpRepo::new(vec![other.clone()]),
    );

    let err = expect_error(&usecase, verify_input(other.id, "482913")).await;
    assert!(matches!(err, AuthServiceError::OtpNotFound), "got {err:?}");
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let user = test_user();
    let otp = test_otp(user.id, "482913", 300);
    let otps = MockOtpRepo::new(vec![otp.clone()]);
    let stored = otps.otps_handle();
    let usecase = verify_usecase(MockUserRepo::new(vec![user]), otps);

    let err = expect_error(&usecase, verify_input(otp.id, "000000")).await;
    assert!(matches!(err, AuthServiceError::OtpNotMatched), "got {err:?}");
    assert!(!stored.lock().unwrap()[0].verified);
}

#[tokio::test]
async fn should_reject_expired_code() {
    let user = test_user();
    let otp = test_otp(user.id, "482913", -1);
    let usecase = verify_usecase(
        MockUserRepo::new(vec![user]),
        MockOtpRepo::new(vec![otp.clone()]),
    );

    let err = expect_error(&usecase, verify_input(otp.id, "482913")).await;
    assert!(matches!(err, AuthServiceError::OtpExpired), "got {err:?}");
}

#[tokio::test]
async fn should_report_used_before_expired() {
    let user = test_user();
    let mut otp = test_otp(user.id, "482913", -1);
    otp.verified = true;
    let usecase = verify_usecase(
        MockUserRepo::new(vec![user]),
        MockOtpRepo::new(vec![otp.clone()]),
    );

    let err = expect_error(&usecase, verify_input(otp.id, "482913")).await;
    assert!(matches!(err, AuthServiceError::OtpAlreadyUsed), "got {err:?}");
}

#[tokio::test]
async fn should_report_used_when_concurrent_verify_wins() {
    let user = test_user();
    let otp = test_otp(user.id, "482913", 300);
    let mut otps = MockOtpRepo::new(vec![otp.clone()]);
    otps.lose_mark_race = true;
    let usecase = verify_usecase(MockUserRepo::new(vec![user]), otps);

    let err = expect_error(&usecase, verify_input(otp.id, "482913")).await;
    assert!(matches!(err, AuthServiceError::OtpAlreadyUsed), "got {err:?}");
}

#[tokio::test]
async fn should_run_register_verify_reverify_relogin_flow() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();
    let stored = otps.otps_handle();

    let login = MobileLoginUseCase {
        users: users.clone(),
        issuer: IssueOtpUseCase {
            otps: otps.clone(),
            invalidate_previous: false,
        },
    };
    let verify = verify_usecase(users, otps);
    let login_input = || MobileLoginInput {
        mobile_number: TEST_MOBILE.to_owned(),
        country_code: TEST_COUNTRY_CODE,
    };

    // Register
    let registered = login.execute(login_input()).await.unwrap();
    assert!(registered.created);
    let otp_id = registered.otp.otp_id;
    let code = stored.lock().unwrap()[0].otp.clone();

    // Verify
    let verified = verify.execute(verify_input(otp_id, &code)).await.unwrap();
    assert_eq!(verified.user.id, registered.user.id);
    assert!(!verified.token.is_empty());

    // Re-verify the same code
    let err = expect_error(&verify, verify_input(otp_id, &code)).await;
    assert!(matches!(err, AuthServiceError::OtpAlreadyUsed), "got {err:?}");

    // Log in again
    let again = login.execute(login_input()).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.user.id, registered.user.id);
    assert_ne!(again.otp.otp_id, otp_id);
}
